//! X25519 key encoding.
//!
//! Keys are exchanged as unpadded URL-safe base64, the format `xray x25519`
//! prints and the share link carries in `pbk`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reality_core::KeyPair;
use x25519_dalek::{PublicKey, StaticSecret};

/// Raw X25519 key length in bytes
pub const KEY_LEN: usize = 32;

/// Encode raw key bytes for configuration files
#[must_use]
pub fn encode_key(bytes: &[u8; KEY_LEN]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a key in the canonical encoding.
///
/// Only unpadded URL-safe base64 is accepted: the value is copied verbatim
/// into configs and the share link, and xray decodes it the same way.
pub fn decode_key(encoded: &str) -> Result<[u8; KEY_LEN], String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| format!("not unpadded URL-safe base64: {e}"))?;

    <[u8; KEY_LEN]>::try_from(bytes.as_slice())
        .map_err(|_| format!("key must be {KEY_LEN} bytes, got {}", bytes.len()))
}

/// Derive the encoded public half from an encoded private half
pub fn public_from_private(private: &str) -> Result<String, String> {
    let secret = StaticSecret::from(decode_key(private)?);
    Ok(encode_key(PublicKey::from(&secret).as_bytes()))
}

/// Check that both halves decode and belong together
pub fn verify_pair(pair: &KeyPair) -> Result<(), String> {
    let derived = public_from_private(&pair.private)?;
    let public = decode_key(&pair.public)?;
    if encode_key(&public) == derived {
        Ok(())
    } else {
        Err("public key does not match private key".into())
    }
}
