//! Host service manager collaborator.
//!
//! After a live install the daemon is restarted so it picks up the new
//! configuration. A failed restart is reported, never fatal: the
//! configuration is already on disk by then.

use async_trait::async_trait;
use serde::Serialize;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Upper bound for a single `systemctl` invocation
pub const SERVICE_TIMEOUT_SECS: u64 = 30;

/// Errors from the service manager.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The manager binary could not be started.
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The manager ran and reported failure.
    #[error("{action} {unit} failed: {stderr}")]
    Failed {
        action: &'static str,
        unit: String,
        stderr: String,
    },

    /// The manager did not answer in time.
    #[error("{action} {unit} timed out after {secs}s")]
    Timeout {
        action: &'static str,
        unit: String,
        secs: u64,
    },
}

/// State reported by the service manager after a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Active,
    Inactive,
    Failed,
    Unknown(String),
}

impl ServiceState {
    /// Map `systemctl is-active` output to a state.
    pub fn parse(output: &str) -> Self {
        match output.trim() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "failed" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Restarts and queries a named service.
#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Restart `unit`.
    async fn restart(&self, unit: &str) -> Result<(), ServiceError>;

    /// Report the current state of `unit`.
    async fn status(&self, unit: &str) -> Result<ServiceState, ServiceError>;
}

/// `systemctl` backed service manager.
#[derive(Debug, Clone)]
pub struct Systemctl {
    program: String,
    timeout: Duration,
}

impl Default for Systemctl {
    fn default() -> Self {
        Self {
            program: "systemctl".to_string(),
            timeout: Duration::from_secs(SERVICE_TIMEOUT_SECS),
        }
    }
}

impl Systemctl {
    /// Use a different binary, e.g. a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(
        &self,
        action: &'static str,
        unit: &str,
    ) -> Result<std::process::Output, ServiceError> {
        let mut command = Command::new(&self.program);
        command
            .args([action, unit])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %self.program, action, unit, "invoking service manager");

        tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ServiceError::Timeout {
                action,
                unit: unit.to_string(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|source| ServiceError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

#[async_trait]
impl ServiceManager for Systemctl {
    async fn restart(&self, unit: &str) -> Result<(), ServiceError> {
        let output = self.run("restart", unit).await?;
        if !output.status.success() {
            return Err(ServiceError::Failed {
                action: "restart",
                unit: unit.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn status(&self, unit: &str) -> Result<ServiceState, ServiceError> {
        // is-active exits non-zero for inactive units but still prints the state
        let output = self.run("is-active", unit).await?;
        Ok(ServiceState::parse(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Outcome of the restart step.
#[derive(Debug, Clone, Serialize)]
pub struct RestartReport {
    pub unit: String,
    pub restarted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ServiceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Restart `unit` and query its state, downgrading failures to a warning.
pub async fn restart_and_report(manager: &dyn ServiceManager, unit: &str) -> RestartReport {
    if let Err(e) = manager.restart(unit).await {
        tracing::warn!(unit, error = %e, "service restart failed");
        return RestartReport {
            unit: unit.to_string(),
            restarted: false,
            state: None,
            warning: Some(e.to_string()),
        };
    }

    match manager.status(unit).await {
        Ok(state) => {
            let warning = (state != ServiceState::Active)
                .then(|| format!("{unit} is {state} after restart"));
            if let Some(w) = &warning {
                tracing::warn!(unit, "{}", w);
            }
            RestartReport {
                unit: unit.to_string(),
                restarted: true,
                state: Some(state),
                warning,
            }
        }
        Err(e) => {
            tracing::warn!(unit, error = %e, "service status query failed");
            RestartReport {
                unit: unit.to_string(),
                restarted: true,
                state: None,
                warning: Some(e.to_string()),
            }
        }
    }
}
