//! Shape checks for identity inputs.
//!
//! These return plain messages; callers wrap them in the error variant that
//! fits their side of the boundary (override vs. generator output).

use std::net::IpAddr;
use uuid::Uuid;

/// Longest short-id the Reality handshake carries (8 bytes)
pub const MAX_SHORT_ID_LEN: usize = 16;

/// Returns true if every character is an ASCII hex digit
#[must_use]
pub fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Non-empty, even-length hex string of at most 16 characters
pub fn short_id(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("short id must not be empty".into());
    }
    if !is_hex(s) {
        return Err(format!("short id must be hex: {s}"));
    }
    if s.len() % 2 != 0 || s.len() > MAX_SHORT_ID_LEN {
        return Err(format!(
            "short id must be an even number of hex chars, at most {MAX_SHORT_ID_LEN}: {s}"
        ));
    }
    Ok(())
}

/// RFC 4122 shaped UUID in the hyphenated form
pub fn client_id(s: &str) -> Result<(), String> {
    if s.len() != 36 {
        return Err(format!("client id must be a hyphenated UUID: {s}"));
    }
    Uuid::parse_str(s)
        .map(|_| ())
        .map_err(|e| format!("client id must be a hyphenated UUID: {e}"))
}

/// Domain name usable as SNI: non-empty labels of letters, digits and hyphens
pub fn server_name(s: &str) -> Result<(), String> {
    let valid = !s.is_empty()
        && s.len() <= 253
        && s.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if valid {
        Ok(())
    } else {
        Err(format!("not a valid domain name: {s}"))
    }
}

/// Address clients dial: a domain name or a bare IPv4/IPv6 literal.
///
/// Ports, schemes, paths and userinfo are rejected; the port is always 443
/// and the address lands verbatim in the link authority.
pub fn server_address(s: &str) -> Result<(), String> {
    if s.parse::<IpAddr>().is_ok() || server_name(s).is_ok() {
        Ok(())
    } else {
        Err(format!(
            "server address must be a domain name or IP address without port or scheme: {s}"
        ))
    }
}
