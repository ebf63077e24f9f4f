use reality_core::{IdentityMaterial, ProtocolVariant, ProxyCredential, RealityError, Result};
use serde_json::{json, Value};
use tracing::debug;

use super::apply_flow;
use crate::document::{first_object_mut, find_node_by_field_mut, object_at_mut, selector};
use crate::layout::{TemplateLayout, TAG_FIELD};

pub(super) fn apply(
    root: &mut Value,
    identity: &IdentityMaterial,
    server_address: &str,
    layout: &TemplateLayout,
    variant: ProtocolVariant,
) -> Result<()> {
    apply_outbound(root, identity, server_address, layout, variant)?;

    if let Some(credential) = identity.proxy_credential() {
        for tag in [&layout.socks_inbound, &layout.http_inbound] {
            apply_credential(root, tag, credential)?;
        }
    }

    Ok(())
}

fn apply_outbound(
    root: &mut Value,
    identity: &IdentityMaterial,
    server_address: &str,
    layout: &TemplateLayout,
    variant: ProtocolVariant,
) -> Result<()> {
    let label = selector("/outbounds", TAG_FIELD, &layout.proxy_outbound);
    let outbound = find_node_by_field_mut(root, "/outbounds", TAG_FIELD, &layout.proxy_outbound)?;

    let server = first_object_mut(outbound, "/settings/vnext", &label)?;
    server.insert("address".into(), Value::from(server_address));

    let user = server
        .get_mut("users")
        .and_then(Value::as_array_mut)
        .and_then(|users| users.first_mut())
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            RealityError::path_not_found(format!("{label}/settings/vnext/0/users/0"))
        })?;
    user.insert("id".into(), Value::from(identity.client_id()));
    apply_flow(user, variant);
    debug!(target_node = %label, address = server_address, "set server address and user");

    let reality = object_at_mut(outbound, "/streamSettings/realitySettings", &label)?;
    reality.insert("serverName".into(), Value::from(identity.server_name()));
    reality.insert(
        "publicKey".into(),
        Value::from(identity.key_pair().public.as_str()),
    );
    reality.insert("shortId".into(), Value::from(identity.short_id()));
    reality.shift_remove("privateKey");
    debug!(target_node = %label, "set reality settings");

    Ok(())
}

fn apply_credential(root: &mut Value, tag: &str, credential: &ProxyCredential) -> Result<()> {
    let label = selector("/inbounds", TAG_FIELD, tag);
    let inbound = find_node_by_field_mut(root, "/inbounds", TAG_FIELD, tag)?;
    let settings = object_at_mut(inbound, "/settings", &label)?;

    settings.insert("auth".into(), Value::from("password"));
    settings.insert(
        "accounts".into(),
        json!([{ "user": credential.user, "pass": credential.pass }]),
    );
    debug!(target_node = %label, "enabled password auth");

    Ok(())
}
