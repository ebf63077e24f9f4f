//! Config synthesis: identity material in, server and client documents out.
//!
//! Both functions are pure. The template is cloned, rewritten at a fixed set
//! of targets, and returned as a new document; a missing target fails the
//! whole synthesis, so a half-rewritten document never escapes.

mod client;
mod server;

use reality_core::{IdentityMaterial, ProtocolVariant, Result};
use serde_json::{Map, Value};

use crate::document::ConfigDocument;
use crate::layout::TemplateLayout;

/// Fully populated server-side document
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig(ConfigDocument);

/// Fully populated client-side document
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig(ConfigDocument);

impl ServerConfig {
    /// The underlying document
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.0
    }

    /// Serialize as pretty JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        self.0.to_pretty_json()
    }
}

impl ClientConfig {
    /// The underlying document
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.0
    }

    /// Serialize as pretty JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        self.0.to_pretty_json()
    }
}

/// Rewrites templates for one protocol variant and template layout
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    layout: TemplateLayout,
    variant: ProtocolVariant,
}

impl Synthesizer {
    /// Create a synthesizer
    #[must_use]
    pub const fn new(layout: TemplateLayout, variant: ProtocolVariant) -> Self {
        Self { layout, variant }
    }

    /// Protocol variant threaded through both documents
    #[must_use]
    pub const fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Template layout in use
    #[must_use]
    pub const fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Build the server document from `template`
    pub fn server(
        &self,
        template: &ConfigDocument,
        identity: &IdentityMaterial,
    ) -> Result<ServerConfig> {
        let mut root = template.as_value().clone();
        server::apply(&mut root, identity, &self.layout, self.variant)?;
        Ok(ServerConfig(ConfigDocument::from_value(root)))
    }

    /// Build the client document from `template`, pointing it at `server_address`
    pub fn client(
        &self,
        template: &ConfigDocument,
        identity: &IdentityMaterial,
        server_address: &str,
    ) -> Result<ClientConfig> {
        let mut root = template.as_value().clone();
        client::apply(&mut root, identity, server_address, &self.layout, self.variant)?;
        Ok(ClientConfig(ConfigDocument::from_value(root)))
    }
}

/// Set or strip the flow directive on a user/client entry
fn apply_flow(entry: &mut Map<String, Value>, variant: ProtocolVariant) {
    match variant.flow() {
        Some(flow) => {
            entry.insert("flow".into(), Value::from(flow));
        }
        None => {
            entry.shift_remove("flow");
        }
    }
}

#[cfg(test)]
mod tests;
