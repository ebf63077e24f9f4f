//! # reality-cli
//!
//! Command-line front end for Reality tunnel provisioning.
//!
//! ## Features
//!
//! - **generate**: resolve identity material, synthesize server and client
//!   configs, write them to staging files or the live daemon path, print the
//!   share link (optionally as a QR code)
//! - **keypair**: print a fresh X25519 key pair
//! - **inspect**: decode a `vless://` share link
//! - **Educational mode**: `--explain` describes what a command is about to do
//! - **Multiple output formats**: pretty, JSON, YAML

pub mod cli;
pub mod config;
pub mod deploy;
pub mod education;
pub mod logging;
pub mod output;
pub mod qr;
pub mod service;

pub use cli::run;
