//! `realityctl config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.emit(config)? {
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();
    let show = |key: &str, value: Option<String>| {
        println!("  {} {}", format!("{key}:").bold(), value.unwrap_or_else(unset));
    };

    println!("{}", "Current Configuration:".bold());
    println!();
    show("output_format", config.output_format.map(|f| f.to_string()));
    show("variant", config.variant.map(|v| v.to_string()));
    show(
        "sni_candidates",
        Some(config.sni_candidates().as_slice().join(", ")),
    );
    show("staging_dir", config.staging_dir.clone());
    show("daemon_config_path", config.daemon_config_path.clone());
    show("service_unit", Some(config.service_unit().to_string()));
    show("log_file", config.log_file.clone());
    show("server_template", config.server_template.clone());
    show("client_template", config.client_template.clone());
    show(
        "layout",
        Some(format!(
            "server_inbound={} proxy_outbound={} socks_inbound={} http_inbound={}",
            config.layout.server_inbound,
            config.layout.proxy_outbound,
            config.layout.socks_inbound,
            config.layout.http_inbound
        )),
    );
    show("explain_by_default", Some(config.explain_by_default.to_string()));

    Ok(())
}

/// Apply `key = value` to `config`.
pub fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let optional = || (!value.is_empty()).then(|| value.to_string());

    match key {
        "output_format" | "output" => config.output_format = Some(value.parse()?),
        "variant" => {
            config.variant = Some(value.parse().map_err(|e: String| anyhow::anyhow!(e))?);
        }
        "sni_candidates" | "sni" => {
            let list: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            for name in &list {
                reality::validate::server_name(name)
                    .map_err(|e| anyhow::anyhow!("Invalid SNI candidate {}: {}", name, e))?;
            }
            config.sni_candidates = (!list.is_empty()).then_some(list);
        }
        "staging_dir" => config.staging_dir = optional(),
        "daemon_config_path" | "daemon_config" => config.daemon_config_path = optional(),
        "service_unit" => config.service_unit = optional(),
        "log_file" => config.log_file = optional(),
        "server_template" => config.server_template = optional(),
        "client_template" => config.client_template = optional(),
        "layout.server_inbound" => config.layout.server_inbound = required(key, value)?,
        "layout.proxy_outbound" => config.layout.proxy_outbound = required(key, value)?,
        "layout.socks_inbound" => config.layout.socks_inbound = required(key, value)?,
        "layout.http_inbound" => config.layout.http_inbound = required(key, value)?,
        "explain_by_default" | "explain" => config.explain_by_default = value.parse()?,
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 output_format        - Default output format (pretty/json/yaml)\n  \
                 variant              - Protocol variant (standard/vision)\n  \
                 sni_candidates       - Comma-separated SNI domains\n  \
                 staging_dir          - Directory for staged configs\n  \
                 daemon_config_path   - Live daemon config path\n  \
                 service_unit         - Service restarted after --install\n  \
                 log_file             - Run log for share links\n  \
                 server_template      - Custom server template\n  \
                 client_template      - Custom client template\n  \
                 layout.<tag>         - Template tags (server_inbound, proxy_outbound,\n                         \
                 socks_inbound, http_inbound)\n  \
                 explain_by_default   - Always explain commands (true/false)",
                key
            );
        }
    }

    Ok(())
}

fn required(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        anyhow::bail!("{} must not be empty", key);
    }
    Ok(value.to_string())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    apply(&mut config, key, value)?;
    config.save()?;

    println!(
        "{} {} set to {}.",
        "Success:".green().bold(),
        key,
        value.trim().cyan()
    );
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
