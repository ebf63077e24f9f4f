//! Template loading.
//!
//! Templates are plain JSON files. Only well-formedness is checked here;
//! whether the proxy daemon accepts the fields is up to the template author.

use reality_core::{RealityError, Result};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::document::ConfigDocument;

const BUILTIN_SERVER: &str = include_str!("../templates/server.json");
const BUILTIN_CLIENT: &str = include_str!("../templates/client.json");

/// Which side a template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Server inbound skeleton
    Server,
    /// Client outbound + local proxy skeleton
    Client,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// Load a template from disk.
///
/// Fails with [`RealityError::TemplateNotFound`] when the file is absent and
/// [`RealityError::TemplateMalformed`] when it is not a JSON object.
pub fn load(path: &Path) -> Result<ConfigDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RealityError::TemplateNotFound {
            path: path.to_path_buf(),
        },
        _ => RealityError::TemplateMalformed {
            path: path.to_path_buf(),
            reason: format!("unreadable: {e}"),
        },
    })?;

    debug!(path = %path.display(), bytes = content.len(), "loaded template");
    parse(&content, path)
}

/// The template embedded in the binary
pub fn builtin(kind: TemplateKind) -> Result<ConfigDocument> {
    let (content, name) = match kind {
        TemplateKind::Server => (BUILTIN_SERVER, "<builtin:server>"),
        TemplateKind::Client => (BUILTIN_CLIENT, "<builtin:client>"),
    };
    parse(content, Path::new(name))
}

/// Load `path` if given, the built-in template otherwise
pub fn load_or_builtin(path: Option<&Path>, kind: TemplateKind) -> Result<ConfigDocument> {
    path.map_or_else(|| builtin(kind), load)
}

fn parse(content: &str, origin: &Path) -> Result<ConfigDocument> {
    let malformed = |reason: String| RealityError::TemplateMalformed {
        path: PathBuf::from(origin),
        reason,
    };

    let root: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
    if !root.is_object() {
        return Err(malformed("top level must be a JSON object".into()));
    }
    Ok(ConfigDocument::from_value(root))
}
