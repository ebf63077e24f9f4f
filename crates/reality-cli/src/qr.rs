//! Terminal QR rendering for share links.
//!
//! Phone clients import a `vless://` link by scanning it, so the link is
//! rendered with half-block characters that fit a normal terminal.

use anyhow::Result;
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

/// Render `uri` as a terminal-friendly Unicode QR code.
pub fn render_terminal(uri: &str) -> Result<String> {
    let code = QrCode::new(uri.as_bytes())
        .map_err(|e| anyhow::anyhow!("Cannot encode share link as QR code: {}", e))?;

    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Dark)
        .light_color(Dense1x2::Light)
        .quiet_zone(true)
        .build())
}
