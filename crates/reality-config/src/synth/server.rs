use reality_core::{IdentityMaterial, ProtocolVariant, RealityError, Result};
use serde_json::{json, Value};
use tracing::debug;

use super::apply_flow;
use crate::document::{array_at_mut, find_node_by_field_mut, object_at_mut, selector};
use crate::layout::{TemplateLayout, TAG_FIELD};

pub(super) fn apply(
    root: &mut Value,
    identity: &IdentityMaterial,
    layout: &TemplateLayout,
    variant: ProtocolVariant,
) -> Result<()> {
    let label = selector("/inbounds", TAG_FIELD, &layout.server_inbound);
    let inbound = find_node_by_field_mut(root, "/inbounds", TAG_FIELD, &layout.server_inbound)?;

    let clients = array_at_mut(inbound, "/settings/clients", &label)?;
    for (index, client) in clients.iter_mut().enumerate() {
        let entry = client.as_object_mut().ok_or_else(|| {
            RealityError::path_not_found(format!("{label}/settings/clients/{index}"))
        })?;
        if index == 0 {
            entry.insert("id".into(), Value::from(identity.client_id()));
        }
        apply_flow(entry, variant);
    }
    debug!(target_node = %label, "set accepted client id");

    let reality = object_at_mut(inbound, "/streamSettings/realitySettings", &label)?;
    // Newer daemons call the camouflage upstream `target`; keep whichever key the template uses.
    let dest_key = if reality.contains_key("target") && !reality.contains_key("dest") {
        "target"
    } else {
        "dest"
    };
    reality.insert(dest_key.into(), Value::from(identity.camouflage_dest()));
    reality.insert("serverNames".into(), json!([identity.server_name()]));
    reality.insert(
        "privateKey".into(),
        Value::from(identity.key_pair().private.as_str()),
    );
    // The empty entry is part of the short-id matching contract.
    reality.insert("shortIds".into(), json!([identity.short_id(), ""]));
    reality.shift_remove("publicKey");
    debug!(target_node = %label, "set reality settings");

    Ok(())
}
