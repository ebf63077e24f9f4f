//! Provision VLESS+Reality tunnels.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reality::{store, uri, IdentityProvider, Overrides, Synthesizer, TemplateKind};
//!
//! fn main() -> reality::Result<()> {
//!     let identity = IdentityProvider::from_entropy().resolve(&Overrides::new())?;
//!
//!     let synth = Synthesizer::default();
//!     let server = synth.server(&store::builtin(TemplateKind::Server)?, &identity)?;
//!     let client = synth.client(&store::builtin(TemplateKind::Client)?, &identity, "203.0.113.7")?;
//!
//!     println!("{}", server.to_pretty_json()?);
//!     println!("{}", client.to_pretty_json()?);
//!     println!("{}", uri::encode("203.0.113.7", &identity, synth.variant()));
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/reality/0.3.0")]

// Re-export core types
pub use reality_core::*;

// Re-export identity resolution
pub use reality_identity::{
    keys, IdentityProvider, KeyPairGenerator, SniCandidates, X25519Generator, XrayKeyGenerator,
};

// Re-export synthesis
pub use reality_config::{
    document, store, uri, ClientConfig, ConfigDocument, ServerConfig, ShareLink, Synthesizer,
    TemplateKind, TemplateLayout,
};

pub use serde_json;
