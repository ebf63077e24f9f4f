//! realityctl - provision VLESS+Reality tunnel endpoints
//!
//! Generates identity material, writes matched server/client configs and
//! prints the share link.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    reality_cli::run().await
}
