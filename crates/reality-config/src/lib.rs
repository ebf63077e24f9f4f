//! # reality-config
//!
//! Turns identity material into a matched pair of proxy configuration
//! documents and a shareable connection link.
//!
//! ## Data Flow
//!
//! ```text
//! store::load / store::builtin  -> ConfigDocument (server + client templates)
//! Synthesizer::server(template, identity)          -> ServerConfig
//! Synthesizer::client(template, identity, address) -> ClientConfig
//! uri::encode(address, identity, variant)          -> vless:// link
//! ```
//!
//! Documents are rewritten only at tagged targets (see [`TemplateLayout`]);
//! everything else passes through unchanged and in its original order.

pub mod document;
pub mod layout;
pub mod store;
pub mod synth;
pub mod uri;

pub use document::{find_node_by_field, find_node_by_field_mut, ConfigDocument};
pub use layout::TemplateLayout;
pub use store::TemplateKind;
pub use synth::{ClientConfig, ServerConfig, Synthesizer};
pub use uri::ShareLink;
