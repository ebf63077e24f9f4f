//! Writing synthesized documents and the run log.

use chrono::{SecondsFormat, Utc};
use reality::{RealityError, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{Destinations, OutputMode, Prepared};

/// Write both documents.
///
/// Each document is first written to a temporary file next to its
/// destination, so a failure while writing leaves both destinations
/// untouched. The two renames that follow cannot be made atomic together:
/// if the client rename fails after the server document was replaced, the
/// previous server document is put back (or the new one removed when there
/// was none) before the error is returned.
pub fn persist(prepared: &Prepared, destinations: &Destinations) -> Result<()> {
    let server_json = prepared.server.to_pretty_json()?;
    let client_json = prepared.client.to_pretty_json()?;

    let server_tmp = stage(&destinations.server, &server_json)?;
    let client_tmp = stage(&destinations.client, &client_json)?;

    let previous_server = match std::fs::read(&destinations.server) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(write_failed(&destinations.server)(e)),
    };

    commit(server_tmp, &destinations.server)?;
    if let Err(e) = commit(client_tmp, &destinations.client) {
        roll_back(&destinations.server, previous_server.as_deref());
        return Err(e);
    }

    info!(
        server = %destinations.server.display(),
        client = %destinations.client.display(),
        "documents written"
    );
    Ok(())
}

/// Restore the server document to its state before [`persist`].
fn roll_back(server: &Path, previous: Option<&[u8]>) {
    let restored = match previous {
        Some(bytes) => std::fs::write(server, bytes),
        None => std::fs::remove_file(server),
    };
    match restored {
        Ok(()) => warn!(
            path = %server.display(),
            "client write failed, server document restored"
        ),
        Err(e) => warn!(
            path = %server.display(),
            error = %e,
            "client write failed and server document could not be restored"
        ),
    }
}

fn write_failed(path: &Path) -> impl FnOnce(std::io::Error) -> RealityError + '_ {
    move |source| RealityError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

fn stage(destination: &Path, content: &str) -> Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_failed(destination))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed(destination))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(write_failed(destination))?;

    // The daemon usually runs unprivileged and must be able to read its config
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_failed(destination))?;
    }

    debug!(path = %destination.display(), bytes = content.len(), "staged");
    Ok(tmp)
}

fn commit(tmp: NamedTempFile, destination: &Path) -> Result<()> {
    tmp.persist(destination)
        .map(drop)
        .map_err(|e| write_failed(destination)(e.error))
}

/// Format one run-log line.
pub fn run_log_line(mode: OutputMode, uri: &str) -> String {
    format!(
        "{} {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        mode,
        uri
    )
}

/// Append the share link to the run log.
pub fn append_run_log(path: &Path, mode: OutputMode, uri: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", run_log_line(mode, uri))?;
    Ok(())
}
