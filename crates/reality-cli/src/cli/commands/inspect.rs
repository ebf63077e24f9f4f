//! `realityctl inspect` - decode a share link.

use anyhow::Result;
use colored::Colorize;
use reality::uri;

use super::Context;
use crate::cli::args::InspectArgs;
use crate::education::Explain;
use crate::qr;

pub async fn execute(ctx: Context, args: InspectArgs) -> Result<()> {
    // Show explanation if requested
    if ctx.explain {
        Explain::inspect().print();
    }

    let link = uri::decode(args.uri.trim())?;

    if !ctx.emit(&link)? {
        let dash = || "-".dimmed().to_string();

        println!("{}", "Share link".bold());
        println!();
        println!("  {:<12} {}", "uuid:".bold(), link.client_id);
        println!("  {:<12} {}:{}", "server:".bold(), link.address, link.port);
        println!("  {:<12} {}", "sni:".bold(), link.server_name);
        println!("  {:<12} {}", "public key:".bold(), link.public_key);
        println!("  {:<12} {}", "short id:".bold(), link.short_id);
        println!("  {:<12} {}", "variant:".bold(), link.variant());
        println!(
            "  {:<12} {}",
            "flow:".bold(),
            link.flow.clone().unwrap_or_else(dash)
        );
        println!(
            "  {:<12} {}",
            "fingerprint:".bold(),
            link.fingerprint.clone().unwrap_or_else(dash)
        );
        println!(
            "  {:<12} {}",
            "transport:".bold(),
            link.transport.clone().unwrap_or_else(dash)
        );
        println!("  {:<12} {}", "label:".bold(), link.label);
    }

    if args.qr {
        println!();
        println!("{}", qr::render_terminal(args.uri.trim())?);
    }

    Ok(())
}
