//! End-to-end tests for the `realityctl` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const CLIENT_ID: &str = "11111111-1111-1111-1111-111111111111";

/// A command isolated from the user's config file and environment.
fn realityctl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("realityctl").unwrap();
    cmd.env("REALITYCTL_CONFIG", dir.join("config.toml"))
        .env_remove("REALITYCTL_OUTPUT")
        .env_remove("REALITYCTL_VARIANT")
        .env_remove("REALITYCTL_STAGING_DIR")
        .env_remove("REALITYCTL_LOG_FILE")
        .env_remove("RUST_LOG")
        .current_dir(dir);
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn by_tag<'a>(list: &'a Value, tag: &str) -> &'a Value {
    list.as_array()
        .unwrap()
        .iter()
        .find(|node| node["tag"] == tag)
        .unwrap()
}

#[test]
fn generate_staging_writes_both_documents() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    realityctl(dir.path())
        .args(["--no-color", "generate", "203.0.113.7", "--uuid", CLIENT_ID])
        .arg("--staging-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "vless://{CLIENT_ID}@203.0.113.7:443?encryption=none&security=reality"
        )))
        .stdout(predicate::str::contains("#203.0.113.7_REALITY"));

    let server = read_json(&out.join("server.json"));
    let client = read_json(&out.join("client.json"));

    let inbound = by_tag(&server["inbounds"], "reality-in");
    assert_eq!(inbound["settings"]["clients"][0]["id"], CLIENT_ID);
    assert!(inbound["settings"]["clients"][0].get("flow").is_none());
    let reality = &inbound["streamSettings"]["realitySettings"];
    assert_eq!(reality["shortIds"].as_array().unwrap().len(), 2);
    assert_eq!(reality["shortIds"][1], "");
    assert!(reality.get("publicKey").is_none());

    let outbound = by_tag(&client["outbounds"], "proxy");
    assert_eq!(outbound["settings"]["vnext"][0]["address"], "203.0.113.7");
    assert_eq!(outbound["settings"]["vnext"][0]["users"][0]["id"], CLIENT_ID);
    let client_reality = &outbound["streamSettings"]["realitySettings"];
    assert_eq!(client_reality["serverName"], reality["serverNames"][0]);
    assert_eq!(client_reality["shortId"], reality["shortIds"][0]);
    assert!(client_reality.get("privateKey").is_none());
}

#[test]
fn half_key_pair_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    realityctl(dir.path())
        .args(["generate", "203.0.113.7", "--private-key"])
        .arg("yPjFmVFq0GdXaxMRjK1VWIWo2PiNIVzSgJePC6gjGWc")
        .arg("--staging-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid override"));

    assert!(!out.exists());
}

#[test]
fn template_without_proxy_outbound_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("client.json"), "previous").unwrap();

    let template = dir.path().join("client-template.json");
    std::fs::write(
        &template,
        r#"{"inbounds": [], "outbounds": [{"tag": "direct", "protocol": "freedom"}]}"#,
    )
    .unwrap();

    realityctl(dir.path())
        .args(["generate", "203.0.113.7"])
        .arg("--client-template")
        .arg(&template)
        .arg("--staging-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("template path not found"))
        .stderr(predicate::str::contains("/outbounds[tag=proxy]"));

    assert_eq!(
        std::fs::read_to_string(out.join("client.json")).unwrap(),
        "previous"
    );
    assert!(!out.join("server.json").exists());
}

#[test]
fn address_with_port_or_scheme_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    for address in ["vpn.example.com:8443", "https://vpn.example.com"] {
        realityctl(dir.path())
            .args(["generate", address])
            .arg("--staging-dir")
            .arg(&out)
            .assert()
            .failure()
            .stderr(predicate::str::contains("server address must be a domain name"));
    }

    assert!(!out.exists());
}

#[test]
fn missing_template_fails() {
    let dir = TempDir::new().unwrap();

    realityctl(dir.path())
        .args(["generate", "203.0.113.7", "--server-template", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found"));
}

#[test]
fn credential_lands_on_both_listeners() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    realityctl(dir.path())
        .args(["generate", "vpn.example.com", "--proxy-user", "abc", "--proxy-pass", "xyz"])
        .arg("--staging-dir")
        .arg(&out)
        .assert()
        .success();

    let client = read_json(&out.join("client.json"));
    for tag in ["socks-in", "http-in"] {
        let settings = &by_tag(&client["inbounds"], tag)["settings"];
        assert_eq!(settings["auth"], "password");
        assert_eq!(
            settings["accounts"],
            serde_json::json!([{ "user": "abc", "pass": "xyz" }])
        );
    }
}

#[test]
fn vision_variant_sets_flow_everywhere() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let assert = realityctl(dir.path())
        .args(["-o", "json", "generate", "vpn.example.com", "--variant", "vision"])
        .arg("--staging-dir")
        .arg(&out)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["variant"], "vision");
    assert!(report["uri"]
        .as_str()
        .unwrap()
        .contains("encryption=none&flow=xtls-rprx-vision&security=reality"));

    let server = read_json(&out.join("server.json"));
    let client = read_json(&out.join("client.json"));
    assert_eq!(
        by_tag(&server["inbounds"], "reality-in")["settings"]["clients"][0]["flow"],
        "xtls-rprx-vision"
    );
    assert_eq!(
        by_tag(&client["outbounds"], "proxy")["settings"]["vnext"][0]["users"][0]["flow"],
        "xtls-rprx-vision"
    );
}

#[test]
fn install_writes_server_to_daemon_path() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let daemon = dir.path().join("etc/xray/config.json");
    let log = dir.path().join("reality.log");

    realityctl(dir.path())
        .args(["generate", "203.0.113.7", "--install", "--no-restart"])
        .arg("--daemon-config")
        .arg(&daemon)
        .arg("--staging-dir")
        .arg(&out)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();

    assert!(daemon.exists());
    assert!(out.join("client.json").exists());
    assert!(!out.join("server.json").exists());

    let line = std::fs::read_to_string(&log).unwrap();
    assert!(line.contains(" live vless://"));
}

#[test]
fn inspect_recovers_generated_link() {
    let dir = TempDir::new().unwrap();

    let assert = realityctl(dir.path())
        .args(["-o", "json", "generate", "2001:db8::1", "--uuid", CLIENT_ID, "--sni", "www.apple.com"])
        .arg("--staging-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let uri = report["uri"].as_str().unwrap();
    assert!(uri.ends_with("#2001%3Adb8%3A%3A1_REALITY"));

    let assert = realityctl(dir.path())
        .args(["-o", "json", "inspect", uri])
        .assert()
        .success();
    let link: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(link["client_id"], CLIENT_ID);
    assert_eq!(link["address"], "2001:db8::1");
    assert_eq!(link["port"], 443);
    assert_eq!(link["server_name"], "www.apple.com");
    assert_eq!(link["public_key"], report["public_key"]);
    assert_eq!(link["short_id"], report["short_id"]);
    assert_eq!(link["label"], "2001:db8::1_REALITY");
}

#[test]
fn inspect_rejects_foreign_links() {
    let dir = TempDir::new().unwrap();

    realityctl(dir.path())
        .args(["inspect", "vmess://abc@host:443"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid share link"));
}

#[test]
fn keypair_prints_matching_halves() {
    let dir = TempDir::new().unwrap();

    let assert = realityctl(dir.path())
        .args(["-o", "json", "keypair"])
        .assert()
        .success();
    let pair: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(pair["private_key"].as_str().unwrap().len(), 43);
    assert_eq!(pair["public_key"].as_str().unwrap().len(), 43);

    // The pair is accepted back as an override
    realityctl(dir.path())
        .args(["generate", "203.0.113.7"])
        .arg("--private-key")
        .arg(pair["private_key"].as_str().unwrap())
        .arg("--public-key")
        .arg(pair["public_key"].as_str().unwrap())
        .arg("--staging-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "pbk={}",
            pair["public_key"].as_str().unwrap()
        )));
}

#[test]
fn config_set_is_used_by_generate() {
    let dir = TempDir::new().unwrap();

    realityctl(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    realityctl(dir.path())
        .args(["config", "set", "variant", "vision"])
        .assert()
        .success();
    realityctl(dir.path())
        .args(["config", "set", "staging_dir"])
        .arg(dir.path().join("staged"))
        .assert()
        .success();

    realityctl(dir.path())
        .args(["generate", "203.0.113.7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flow=xtls-rprx-vision"));

    assert!(dir.path().join("staged/server.json").exists());
}

#[test]
fn unknown_config_key_fails() {
    let dir = TempDir::new().unwrap();

    realityctl(dir.path())
        .args(["config", "set", "api_key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
