//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use reality::ProtocolVariant;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Provision VLESS+Reality tunnel endpoints
///
/// Generates identity material, writes matching server and client configs,
/// and prints the vless:// share link.
/// Use --explain on any command to learn what it does.
#[derive(Parser, Debug)]
#[command(name = "realityctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, env = "REALITYCTL_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate server and client configs and a share link
    Generate(GenerateArgs),

    /// Print a fresh X25519 key pair
    Keypair(KeypairArgs),

    /// Decode a vless:// share link
    Inspect(InspectArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Generate command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Public address (IP or domain) clients connect to
    pub address: String,

    /// Client UUID instead of a random one
    #[arg(long = "uuid", env = "REALITYCTL_UUID")]
    pub client_id: Option<String>,

    /// Reality private key (requires --public-key)
    #[arg(long, env = "REALITYCTL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Reality public key (requires --private-key)
    #[arg(long, env = "REALITYCTL_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Short id (hex, even length, up to 16 chars)
    #[arg(long, env = "REALITYCTL_SHORT_ID")]
    pub short_id: Option<String>,

    /// SNI / camouflage domain instead of a random candidate
    #[arg(long, env = "REALITYCTL_SNI")]
    pub sni: Option<String>,

    /// Local proxy username (requires --proxy-pass)
    #[arg(long, env = "REALITYCTL_PROXY_USER")]
    pub proxy_user: Option<String>,

    /// Local proxy password (requires --proxy-user)
    #[arg(long, env = "REALITYCTL_PROXY_PASS", hide_env_values = true)]
    pub proxy_pass: Option<String>,

    /// Protect the local SOCKS/HTTP listeners with a generated credential
    #[arg(long, conflicts_with_all = ["proxy_user", "proxy_pass"])]
    pub proxy_auth: bool,

    /// Protocol variant: standard or vision
    #[arg(long, env = "REALITYCTL_VARIANT")]
    pub variant: Option<ProtocolVariant>,

    /// Write the server config to the live daemon path and restart the service
    #[arg(long)]
    pub install: bool,

    /// Directory for staged configs
    #[arg(long, env = "REALITYCTL_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Live daemon config path (with --install)
    #[arg(long, env = "REALITYCTL_DAEMON_CONFIG")]
    pub daemon_config: Option<PathBuf>,

    /// Server template instead of the built-in one
    #[arg(long, env = "REALITYCTL_SERVER_TEMPLATE")]
    pub server_template: Option<PathBuf>,

    /// Client template instead of the built-in one
    #[arg(long, env = "REALITYCTL_CLIENT_TEMPLATE")]
    pub client_template: Option<PathBuf>,

    /// Service unit to restart (with --install)
    #[arg(long, env = "REALITYCTL_SERVICE_UNIT")]
    pub service_unit: Option<String>,

    /// Do not restart the service after --install
    #[arg(long)]
    pub no_restart: bool,

    /// Append the share link to this file
    #[arg(long, env = "REALITYCTL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the share link as a QR code
    #[arg(long)]
    pub qr: bool,

    /// Generate keys with `xray x25519` (optionally naming the binary)
    #[arg(long, value_name = "BIN", num_args = 0..=1, default_missing_value = "xray")]
    pub xray_keys: Option<PathBuf>,
}

// ============================================================================
// Keypair command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct KeypairArgs {
    /// Generate with `xray x25519` (optionally naming the binary)
    #[arg(long, value_name = "BIN", num_args = 0..=1, default_missing_value = "xray")]
    pub xray_keys: Option<PathBuf>,
}

// ============================================================================
// Inspect command
// ============================================================================

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// vless:// share link
    pub uri: String,

    /// Also print the link as a QR code
    #[arg(long)]
    pub qr: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "realityctl",
            "generate",
            "203.0.113.7",
            "--uuid",
            "11111111-1111-1111-1111-111111111111",
            "--variant",
            "vision",
            "--xray-keys",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.address, "203.0.113.7");
        assert_eq!(args.variant, Some(ProtocolVariant::Vision));
        assert_eq!(args.xray_keys, Some(PathBuf::from("xray")));
        assert!(!args.install);
    }

    #[test]
    fn test_proxy_auth_conflicts_with_explicit_credential() {
        let result = Cli::try_parse_from([
            "realityctl",
            "generate",
            "a.example",
            "--proxy-auth",
            "--proxy-user",
            "abc",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let result =
            Cli::try_parse_from(["realityctl", "generate", "a.example", "--variant", "grpc"]);
        assert!(result.is_err());
    }
}
