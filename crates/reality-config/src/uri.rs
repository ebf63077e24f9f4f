//! `vless://` share links.
//!
//! Layout, byte for byte:
//!
//! ```text
//! vless://<id>@<address>:443?encryption=none[&flow=xtls-rprx-vision]&security=reality
//!     &sni=<sni>&fp=chrome&pbk=<public key>&sid=<short id>&type=tcp#<address>_REALITY
//! ```
//!
//! Query order is fixed because some importers parse positionally. The
//! label is percent-encoded with URI-component rules.

use reality_core::{IdentityMaterial, ProtocolVariant, RealityError, Result, REALITY_PORT};
use serde::Serialize;
use url::Url;

/// URI scheme
pub const SCHEME: &str = "vless";

/// uTLS fingerprint the client impersonates
pub const FINGERPRINT: &str = "chrome";

/// Transport carried in `type`
pub const TRANSPORT: &str = "tcp";

/// Suffix appended to the server address to form the label
pub const LABEL_SUFFIX: &str = "_REALITY";

/// Encode a share link for `server_address`.
#[must_use]
pub fn encode(server_address: &str, identity: &IdentityMaterial, variant: ProtocolVariant) -> String {
    let mut query: Vec<(&str, &str)> = vec![("encryption", "none")];
    if let Some(flow) = variant.flow() {
        query.push(("flow", flow));
    }
    query.extend([
        ("security", "reality"),
        ("sni", identity.server_name()),
        ("fp", FINGERPRINT),
        ("pbk", identity.key_pair().public.as_str()),
        ("sid", identity.short_id()),
        ("type", TRANSPORT),
    ]);

    let query = query
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let label = format!("{server_address}{LABEL_SUFFIX}");

    format!(
        "{SCHEME}://{}@{}:{REALITY_PORT}?{query}#{}",
        urlencoding::encode(identity.client_id()),
        uri_host(server_address),
        urlencoding::encode(&label),
    )
}

/// Components recovered from a share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    /// Client UUID
    pub client_id: String,
    /// Server address, without IPv6 brackets
    pub address: String,
    /// Server port
    pub port: u16,
    /// SNI
    pub server_name: String,
    /// Public key half
    pub public_key: String,
    /// Short-id
    pub short_id: String,
    /// Flow directive, present only for the Vision variant
    pub flow: Option<String>,
    /// Fingerprint marker
    pub fingerprint: Option<String>,
    /// Transport type
    pub transport: Option<String>,
    /// Decoded label
    pub label: String,
}

impl ShareLink {
    /// Protocol variant implied by the presence of `flow`
    #[must_use]
    pub const fn variant(&self) -> ProtocolVariant {
        if self.flow.is_some() {
            ProtocolVariant::Vision
        } else {
            ProtocolVariant::Standard
        }
    }
}

/// Parse a share link produced by [`encode`] (or a compatible tool).
pub fn decode(uri: &str) -> Result<ShareLink> {
    let invalid = |msg: &str| RealityError::InvalidShareLink(msg.to_string());

    let url = Url::parse(uri.trim()).map_err(|e| RealityError::InvalidShareLink(e.to_string()))?;
    if url.scheme() != SCHEME {
        return Err(RealityError::InvalidShareLink(format!(
            "expected {SCHEME}:// scheme, got {}://",
            url.scheme()
        )));
    }

    let client_id = urlencoding::decode(url.username())
        .map_err(|e| RealityError::InvalidShareLink(e.to_string()))?
        .into_owned();
    if client_id.is_empty() {
        return Err(invalid("missing client id"));
    }

    let address = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid("missing server address"))?;
    let port = url.port().ok_or_else(|| invalid("missing port"))?;

    let mut security = None;
    let mut server_name = None;
    let mut public_key = None;
    let mut short_id = None;
    let mut flow = None;
    let mut fingerprint = None;
    let mut transport = None;
    for (key, value) in url.query_pairs() {
        let value = value.into_owned();
        match key.as_ref() {
            "security" => security = Some(value),
            "sni" => server_name = Some(value),
            "pbk" => public_key = Some(value),
            "sid" => short_id = Some(value),
            "flow" if !value.is_empty() => flow = Some(value),
            "fp" => fingerprint = Some(value),
            "type" => transport = Some(value),
            _ => {}
        }
    }

    if security.as_deref() != Some("reality") {
        return Err(invalid("security must be reality"));
    }

    let label = match url.fragment() {
        Some(fragment) => urlencoding::decode(fragment)
            .map_err(|e| RealityError::InvalidShareLink(e.to_string()))?
            .into_owned(),
        None => String::new(),
    };

    Ok(ShareLink {
        client_id,
        address,
        port,
        server_name: server_name.ok_or_else(|| invalid("missing sni"))?,
        public_key: public_key.ok_or_else(|| invalid("missing pbk"))?,
        short_id: short_id.ok_or_else(|| invalid("missing sid"))?,
        flow,
        fingerprint,
        transport,
        label,
    })
}

/// IPv6 literals need brackets in the authority
fn uri_host(address: &str) -> String {
    if address.contains(':') && !address.starts_with('[') {
        format!("[{address}]")
    } else {
        address.to_string()
    }
}
