//! Request orchestration.
//!
//! A run is split in two phases. [`prepare`] resolves the identity, loads
//! both templates and produces both documents plus the share link without
//! touching the filesystem outside of template reads. [`writer::persist`]
//! then writes the documents. Any error in the first phase leaves every
//! destination untouched.

pub mod writer;

use rand::{CryptoRng, RngCore};
use reality::{
    store, uri, ClientConfig, IdentityMaterial, IdentityProvider, Overrides, ProtocolVariant,
    ServerConfig, Synthesizer, TemplateKind, TemplateLayout,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Staged server document name
pub const SERVER_FILE: &str = "server.json";

/// Staged client document name
pub const CLIENT_FILE: &str = "client.json";

/// Where the server document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Both documents in the staging directory
    Staging,
    /// Server document at the daemon path, client document staged
    Live,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staging => write!(f, "staging"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Everything one provisioning run needs, parsed from the command line.
#[derive(Debug, Clone)]
pub struct Request {
    pub server_address: String,
    pub overrides: Overrides,
    pub variant: ProtocolVariant,
    pub layout: TemplateLayout,
    pub server_template: Option<PathBuf>,
    pub client_template: Option<PathBuf>,
    pub mode: OutputMode,
    pub staging_dir: PathBuf,
    pub daemon_config_path: PathBuf,
}

impl Request {
    /// Final paths of the server and client documents.
    pub fn destinations(&self) -> Destinations {
        let server = match self.mode {
            OutputMode::Staging => self.staging_dir.join(SERVER_FILE),
            OutputMode::Live => self.daemon_config_path.clone(),
        };
        Destinations {
            server,
            client: self.staging_dir.join(CLIENT_FILE),
        }
    }
}

/// Final document locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destinations {
    pub server: PathBuf,
    pub client: PathBuf,
}

/// The full projection of one identity, ready to be written.
#[derive(Debug)]
pub struct Prepared {
    pub identity: IdentityMaterial,
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub uri: String,
}

/// Resolve identity material and build both documents and the share link.
pub fn prepare<R: RngCore + CryptoRng>(
    request: &Request,
    provider: &mut IdentityProvider<R>,
) -> reality::Result<Prepared> {
    let server_address = request.server_address.trim();
    reality::validate::server_address(server_address).map_err(reality::RealityError::Config)?;

    let identity = provider.resolve(&request.overrides)?;

    let server_template =
        store::load_or_builtin(request.server_template.as_deref(), TemplateKind::Server)?;
    let client_template =
        store::load_or_builtin(request.client_template.as_deref(), TemplateKind::Client)?;

    let synth = Synthesizer::new(request.layout.clone(), request.variant);
    let server = synth.server(&server_template, &identity)?;
    let client = synth.client(&client_template, &identity, server_address)?;
    let uri = uri::encode(server_address, &identity, synth.variant());

    info!(
        mode = %request.mode,
        variant = %request.variant,
        server_name = identity.server_name(),
        "documents synthesized"
    );

    Ok(Prepared {
        identity,
        server,
        client,
        uri,
    })
}

/// Summary of a finished run, printed by `generate`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: OutputMode,
    pub variant: ProtocolVariant,
    pub server_address: String,
    pub client_id: String,
    pub server_name: String,
    pub short_id: String,
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_pass: Option<String>,
    pub server_config: PathBuf,
    pub client_config: PathBuf,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<crate::service::RestartReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(request: &Request, prepared: &Prepared, written: &Destinations) -> Self {
        let identity = &prepared.identity;
        let credential = identity.proxy_credential();
        Self {
            mode: request.mode,
            variant: request.variant,
            server_address: request.server_address.trim().to_string(),
            client_id: identity.client_id().to_string(),
            server_name: identity.server_name().to_string(),
            short_id: identity.short_id().to_string(),
            public_key: identity.key_pair().public.clone(),
            proxy_user: credential.map(|c| c.user.clone()),
            proxy_pass: credential.map(|c| c.pass.clone()),
            server_config: written.server.clone(),
            client_config: written.client.clone(),
            uri: prepared.uri.clone(),
            service: None,
            warnings: Vec::new(),
        }
    }

    /// Directory the client document was written to
    pub fn staging_dir(&self) -> Option<&Path> {
        self.client_config.parent()
    }
}
