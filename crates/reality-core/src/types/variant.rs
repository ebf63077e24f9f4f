use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Flow-control directive used by the Vision variant
pub const VISION_FLOW: &str = "xtls-rprx-vision";

/// Which generation of the VLESS+Reality pairing to emit.
///
/// The variant is resolved once per run and threaded through both
/// synthesizers and the URI encoder so all three outputs agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVariant {
    /// No flow control anywhere; flow fields inherited from templates are stripped
    #[default]
    Standard,
    /// Legacy pairing with `flow = xtls-rprx-vision` on both sides and in the URI
    Vision,
}

impl ProtocolVariant {
    /// Flow directive this variant writes, if any
    #[must_use]
    pub const fn flow(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Vision => Some(VISION_FLOW),
        }
    }
}

impl FromStr for ProtocolVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "plain" | "none" => Ok(Self::Standard),
            "vision" | VISION_FLOW => Ok(Self::Vision),
            _ => Err(format!(
                "unknown protocol variant: {s} (valid variants: standard, vision)"
            )),
        }
    }
}

impl std::fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Vision => write!(f, "vision"),
        }
    }
}
