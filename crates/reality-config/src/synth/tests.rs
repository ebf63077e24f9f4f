use super::*;
use crate::store::{builtin, TemplateKind};
use reality_core::{KeyPair, ProxyCredential, RealityError};
use serde_json::json;

const PRIVATE: &str = "kDdbpq5ByV7IA0YDX2Jpp5xWvuHR0wzgmMoyYKPtyWI";
const PUBLIC: &str = "Fm6ybFbbvrSYWmYbE2u8Ek9a3Wr9MSfdRpKQJOcwpy4";
const CLIENT_ID: &str = "11111111-1111-1111-1111-111111111111";

fn identity(credential: Option<ProxyCredential>) -> IdentityMaterial {
    IdentityMaterial::new(
        CLIENT_ID,
        KeyPair::new(PRIVATE, PUBLIC),
        "6ba85179e30d4fc2",
        "www.microsoft.com",
        credential,
    )
    .unwrap()
}

fn server_template() -> ConfigDocument {
    builtin(TemplateKind::Server).unwrap()
}

fn client_template() -> ConfigDocument {
    builtin(TemplateKind::Client).unwrap()
}

#[test]
fn test_server_document_fields() {
    let server = Synthesizer::default()
        .server(&server_template(), &identity(None))
        .unwrap();
    let doc = server.document();

    assert_eq!(doc.pointer("/inbounds/0/settings/clients/0/id").unwrap(), CLIENT_ID);
    let reality = doc.pointer("/inbounds/0/streamSettings/realitySettings").unwrap();
    assert_eq!(reality["dest"], "www.microsoft.com:443");
    assert_eq!(reality["serverNames"], json!(["www.microsoft.com"]));
    assert_eq!(reality["privateKey"], PRIVATE);
    assert_eq!(reality["shortIds"], json!(["6ba85179e30d4fc2", ""]));
    assert!(reality.get("publicKey").is_none());
}

#[test]
fn test_client_document_fields() {
    let client = Synthesizer::default()
        .client(&client_template(), &identity(None), "203.0.113.7")
        .unwrap();
    let doc = client.document();

    let vnext = doc.pointer("/outbounds/0/settings/vnext/0").unwrap();
    assert_eq!(vnext["address"], "203.0.113.7");
    assert_eq!(vnext["port"], 443);
    assert_eq!(vnext["users"][0]["id"], CLIENT_ID);

    let reality = doc.pointer("/outbounds/0/streamSettings/realitySettings").unwrap();
    assert_eq!(reality["serverName"], "www.microsoft.com");
    assert_eq!(reality["publicKey"], PUBLIC);
    assert_eq!(reality["shortId"], "6ba85179e30d4fc2");
    assert_eq!(reality["fingerprint"], "chrome");
}

#[test]
fn test_key_halves_never_cross() {
    for variant in [ProtocolVariant::Standard, ProtocolVariant::Vision] {
        let synth = Synthesizer::new(TemplateLayout::default(), variant);
        let server = synth.server(&server_template(), &identity(None)).unwrap();
        let client = synth
            .client(&client_template(), &identity(None), "example.net")
            .unwrap();

        let server_json = server.to_pretty_json().unwrap();
        let client_json = client.to_pretty_json().unwrap();
        assert!(server_json.contains(PRIVATE));
        assert!(!server_json.contains(PUBLIC));
        assert!(client_json.contains(PUBLIC));
        assert!(!client_json.contains(PRIVATE));
    }
}

#[test]
fn test_stale_key_residue_removed() {
    let mut server_value = server_template().into_value();
    server_value["inbounds"][0]["streamSettings"]["realitySettings"]["publicKey"] =
        json!("stale-public");
    let mut client_value = client_template().into_value();
    client_value["outbounds"][0]["streamSettings"]["realitySettings"]["privateKey"] =
        json!("stale-private");

    let synth = Synthesizer::default();
    let server = synth
        .server(&ConfigDocument::from_value(server_value), &identity(None))
        .unwrap();
    let client = synth
        .client(&ConfigDocument::from_value(client_value), &identity(None), "a.example")
        .unwrap();

    assert!(server
        .document()
        .pointer("/inbounds/0/streamSettings/realitySettings/publicKey")
        .is_none());
    assert!(client
        .document()
        .pointer("/outbounds/0/streamSettings/realitySettings/privateKey")
        .is_none());
}

#[test]
fn test_synthesis_is_idempotent() {
    let synth = Synthesizer::default();
    let template = server_template();
    let a = synth.server(&template, &identity(None)).unwrap().to_pretty_json().unwrap();
    let b = synth.server(&template, &identity(None)).unwrap().to_pretty_json().unwrap();
    assert_eq!(a, b);

    let template = client_template();
    let credential = Some(ProxyCredential::new("abc", "xyz"));
    let a = synth
        .client(&template, &identity(credential.clone()), "example.net")
        .unwrap()
        .to_pretty_json()
        .unwrap();
    let b = synth
        .client(&template, &identity(credential), "example.net")
        .unwrap()
        .to_pretty_json()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_template_is_not_mutated() {
    let template = server_template();
    let before = template.clone();
    Synthesizer::default().server(&template, &identity(None)).unwrap();
    assert_eq!(template, before);
}

#[test]
fn test_untouched_fields_keep_order() {
    let template = client_template();
    let client = Synthesizer::default()
        .client(&template, &identity(None), "example.net")
        .unwrap();

    let keys = |doc: &ConfigDocument| -> Vec<String> {
        doc.as_value().as_object().unwrap().keys().cloned().collect()
    };
    assert_eq!(keys(&template), keys(client.document()));
    assert_eq!(
        template.pointer("/routing").unwrap(),
        client.document().pointer("/routing").unwrap()
    );
}

#[test]
fn test_standard_variant_strips_flow() {
    let synth = Synthesizer::new(TemplateLayout::default(), ProtocolVariant::Standard);
    let server = synth.server(&server_template(), &identity(None)).unwrap();
    let client = synth
        .client(&client_template(), &identity(None), "example.net")
        .unwrap();

    assert!(server
        .document()
        .pointer("/inbounds/0/settings/clients/0/flow")
        .is_none());
    assert!(client
        .document()
        .pointer("/outbounds/0/settings/vnext/0/users/0/flow")
        .is_none());
}

#[test]
fn test_vision_variant_sets_flow() {
    let synth = Synthesizer::new(TemplateLayout::default(), ProtocolVariant::Vision);
    let server = synth.server(&server_template(), &identity(None)).unwrap();
    let client = synth
        .client(&client_template(), &identity(None), "example.net")
        .unwrap();

    assert_eq!(
        server
            .document()
            .pointer("/inbounds/0/settings/clients/0/flow")
            .unwrap(),
        "xtls-rprx-vision"
    );
    assert_eq!(
        client
            .document()
            .pointer("/outbounds/0/settings/vnext/0/users/0/flow")
            .unwrap(),
        "xtls-rprx-vision"
    );
}

#[test]
fn test_short_id_list_always_has_trailing_empty_entry() {
    for short_id in ["ab", "0123", "6ba85179e30d4fc2"] {
        let identity = IdentityMaterial::new(
            CLIENT_ID,
            KeyPair::new(PRIVATE, PUBLIC),
            short_id,
            "www.apple.com",
            None,
        )
        .unwrap();
        let server = Synthesizer::default()
            .server(&server_template(), &identity)
            .unwrap();
        let ids = server
            .document()
            .pointer("/inbounds/0/streamSettings/realitySettings/shortIds")
            .unwrap();
        assert_eq!(ids, &json!([short_id, ""]));
    }
}

#[test]
fn test_credential_installed_on_both_listeners() {
    let client = Synthesizer::default()
        .client(
            &client_template(),
            &identity(Some(ProxyCredential::new("abc", "xyz"))),
            "example.net",
        )
        .unwrap();
    let doc = client.document().as_value();

    for tag in ["socks-in", "http-in"] {
        let inbound = crate::document::find_node_by_field(doc, "/inbounds", "tag", tag).unwrap();
        assert_eq!(inbound["settings"]["auth"], "password");
        assert_eq!(
            inbound["settings"]["accounts"],
            json!([{ "user": "abc", "pass": "xyz" }])
        );
    }
}

#[test]
fn test_no_credential_leaves_listeners_untouched() {
    let template = client_template();
    let client = Synthesizer::default()
        .client(&template, &identity(None), "example.net")
        .unwrap();
    assert_eq!(
        template.pointer("/inbounds").unwrap(),
        client.document().pointer("/inbounds").unwrap()
    );
}

#[test]
fn test_missing_proxy_outbound_fails() {
    let mut value = client_template().into_value();
    value["outbounds"][0]["tag"] = json!("renamed");

    let err = Synthesizer::default()
        .client(&ConfigDocument::from_value(value), &identity(None), "example.net")
        .unwrap_err();
    match err {
        RealityError::TemplatePathNotFound { path } => {
            assert_eq!(path, "/outbounds[tag=proxy]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_listener_fails_only_with_credential() {
    let mut value = client_template().into_value();
    value["inbounds"].as_array_mut().unwrap().remove(1);
    let template = ConfigDocument::from_value(value);
    let synth = Synthesizer::default();

    assert!(synth.client(&template, &identity(None), "example.net").is_ok());

    let err = synth
        .client(
            &template,
            &identity(Some(ProxyCredential::new("abc", "xyz"))),
            "example.net",
        )
        .unwrap_err();
    assert!(matches!(err, RealityError::TemplatePathNotFound { .. }));
}

#[test]
fn test_missing_reality_settings_fails() {
    let mut value = server_template().into_value();
    value["inbounds"][0]["streamSettings"]
        .as_object_mut()
        .unwrap()
        .remove("realitySettings");

    let err = Synthesizer::default()
        .server(&ConfigDocument::from_value(value), &identity(None))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "template path not found: /inbounds[tag=reality-in]/streamSettings/realitySettings"
    );
}

#[test]
fn test_nodes_found_by_tag_not_position() {
    let template = ConfigDocument::from_value(json!({
        "inbounds": [
            { "tag": "api", "protocol": "dokodemo-door" },
            {
                "tag": "edge",
                "settings": { "clients": [{ "id": "" }] },
                "streamSettings": { "realitySettings": { "target": "" } }
            }
        ]
    }));
    let layout = TemplateLayout {
        server_inbound: "edge".into(),
        ..TemplateLayout::default()
    };

    let server = Synthesizer::new(layout, ProtocolVariant::Standard)
        .server(&template, &identity(None))
        .unwrap();
    let doc = server.document();
    assert_eq!(doc.pointer("/inbounds/0"), template.pointer("/inbounds/0"));
    assert_eq!(doc.pointer("/inbounds/1/settings/clients/0/id").unwrap(), CLIENT_ID);
    let reality = doc.pointer("/inbounds/1/streamSettings/realitySettings").unwrap();
    assert_eq!(reality["target"], "www.microsoft.com:443");
    assert!(reality.get("dest").is_none());
}
