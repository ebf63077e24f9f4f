//! Tag names the synthesizer addresses inside templates.

use serde::{Deserialize, Serialize};

/// Discriminator field used to select inbound/outbound entries
pub const TAG_FIELD: &str = "tag";

/// Where the synthesizer looks for its targets.
///
/// Defaults match the built-in templates. Custom templates that use other
/// tags override the matching field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    /// Tag of the VLESS+Reality inbound in the server template
    pub server_inbound: String,

    /// Tag of the VLESS+Reality outbound in the client template
    pub proxy_outbound: String,

    /// Tag of the local SOCKS listener in the client template
    pub socks_inbound: String,

    /// Tag of the local HTTP listener in the client template
    pub http_inbound: String,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            server_inbound: String::from("reality-in"),
            proxy_outbound: String::from("proxy"),
            socks_inbound: String::from("socks-in"),
            http_inbound: String::from("http-in"),
        }
    }
}
