//! Key-pair generators.
//!
//! [`X25519Generator`] produces keys in-process; [`XrayKeyGenerator`] asks an
//! installed `xray` binary, matching what operators get from `xray x25519`.

use rand::{CryptoRng, RngCore};
use reality_core::{KeyPair, RealityError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::keys::encode_key;

/// Source of X25519 key pairs
pub trait KeyPairGenerator {
    /// Produce a fresh key pair
    fn generate(&mut self) -> Result<KeyPair>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// In-process X25519 generator driven by a caller-supplied RNG
pub struct X25519Generator<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> X25519Generator<R> {
    /// Create a generator drawing from `rng`
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> KeyPairGenerator for X25519Generator<R> {
    fn generate(&mut self) -> Result<KeyPair> {
        let secret = StaticSecret::random_from_rng(&mut self.rng);
        let public = PublicKey::from(&secret);
        Ok(KeyPair::new(
            encode_key(&secret.to_bytes()),
            encode_key(public.as_bytes()),
        ))
    }

    fn name(&self) -> &'static str {
        "x25519"
    }
}

/// Generator that shells out to `xray x25519`
#[derive(Debug, Clone)]
pub struct XrayKeyGenerator {
    binary: PathBuf,
}

impl Default for XrayKeyGenerator {
    fn default() -> Self {
        Self::new("xray")
    }
}

impl XrayKeyGenerator {
    /// Use the given `xray` executable (bare names are looked up on `PATH`)
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl KeyPairGenerator for XrayKeyGenerator {
    fn generate(&mut self) -> Result<KeyPair> {
        debug!(binary = %self.binary.display(), "running xray x25519");

        let output = Command::new(&self.binary)
            .arg("x25519")
            .output()
            .map_err(|e| {
                RealityError::generation_failed(
                    "key pair",
                    format!("cannot run {}: {e}", self.binary.display()),
                )
            })?;

        if !output.status.success() {
            return Err(RealityError::generation_failed(
                "key pair",
                format!(
                    "{} x25519 exited with {}: {}",
                    self.binary.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        parse_xray_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &'static str {
        "xray"
    }
}

/// Parse the output of `xray x25519`.
///
/// Older releases print `Private key:` / `Public key:`; current ones print
/// `PrivateKey:` / `Password:` (the public half) followed by `Hash32:`.
pub fn parse_xray_output(stdout: &str) -> Result<KeyPair> {
    let mut private = None;
    let mut public = None;

    for line in stdout.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match label.trim().to_ascii_lowercase().replace(' ', "").as_str() {
            "privatekey" => private = Some(value.to_string()),
            "publickey" | "password" => public = Some(value.to_string()),
            _ => {}
        }
    }

    match (private, public) {
        (Some(private), Some(public)) => Ok(KeyPair::new(private, public)),
        _ => Err(RealityError::generation_failed(
            "key pair",
            "xray output has no recognizable private/public key pair",
        )),
    }
}
