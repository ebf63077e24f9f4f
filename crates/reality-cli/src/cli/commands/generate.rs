//! `realityctl generate` - provision a Reality endpoint.

use anyhow::Result;
use colored::Colorize;
use reality::{non_empty, IdentityProvider, Overrides, XrayKeyGenerator};
use std::path::PathBuf;

use super::Context;
use crate::cli::args::GenerateArgs;
use crate::config::expand_path;
use crate::deploy::{self, writer, OutputMode, Report, Request};
use crate::education::Explain;
use crate::qr;
use crate::service::{self, Systemctl};

pub async fn execute(ctx: Context, args: GenerateArgs) -> Result<()> {
    let request = build_request(&ctx, &args)?;
    let destinations = request.destinations();

    // Show explanation if requested
    if ctx.explain {
        Explain::generate(
            &request.server_address,
            request.mode,
            &destinations.server.display().to_string(),
            &destinations.client.display().to_string(),
        )
        .print();
    }

    let prepared = {
        let mut provider =
            IdentityProvider::from_entropy().with_sni_candidates(ctx.config.sni_candidates());
        if let Some(binary) = &args.xray_keys {
            provider = provider.with_key_generator(Box::new(XrayKeyGenerator::new(binary)));
        }
        deploy::prepare(&request, &mut provider)?
    };

    // Nothing is written unless both documents and the link exist
    writer::persist(&prepared, &destinations)?;

    let mut report = Report::new(&request, &prepared, &destinations);

    let log_file = match &args.log_file {
        Some(path) => Some(path.clone()),
        None => ctx.config.log_file.as_deref().map(expand_path).transpose()?,
    };
    if let Some(path) = log_file {
        if let Err(e) = writer::append_run_log(&path, request.mode, &prepared.uri) {
            tracing::warn!(path = %path.display(), error = %e, "cannot append to run log");
            report
                .warnings
                .push(format!("run log {} not updated: {}", path.display(), e));
        }
    }

    if request.mode == OutputMode::Live && !args.no_restart {
        let unit = args
            .service_unit
            .as_deref()
            .unwrap_or_else(|| ctx.config.service_unit());
        let restart = service::restart_and_report(&Systemctl::default(), unit).await;
        if let Some(warning) = &restart.warning {
            report.warnings.push(warning.clone());
        }
        report.service = Some(restart);
    }

    if !ctx.emit(&report)? {
        print_pretty(&ctx, &report);
    }

    if args.qr {
        println!();
        println!("{}", qr::render_terminal(&report.uri)?);
    }

    Ok(())
}

/// Merge flags, environment and config file into a [`Request`].
pub fn build_request(ctx: &Context, args: &GenerateArgs) -> Result<Request> {
    let config = &ctx.config;

    let mut overrides = Overrides::new().generate_credential(args.proxy_auth);
    overrides.client_id = non_empty(args.client_id.clone());
    overrides.private_key = non_empty(args.private_key.clone());
    overrides.public_key = non_empty(args.public_key.clone());
    overrides.short_id = non_empty(args.short_id.clone());
    overrides.server_name = non_empty(args.sni.clone());
    overrides.proxy_user = non_empty(args.proxy_user.clone());
    overrides.proxy_pass = non_empty(args.proxy_pass.clone());

    let staging_dir = match &args.staging_dir {
        Some(dir) => dir.clone(),
        None => config.staging_dir()?,
    };
    let daemon_config_path = match &args.daemon_config {
        Some(path) => path.clone(),
        None => config.daemon_config_path()?,
    };

    Ok(Request {
        server_address: args.address.trim().to_string(),
        overrides,
        variant: args.variant.or(config.variant).unwrap_or_default(),
        layout: config.layout.clone(),
        server_template: template_path(
            args.server_template.as_ref(),
            config.server_template.as_deref(),
        )?,
        client_template: template_path(
            args.client_template.as_ref(),
            config.client_template.as_deref(),
        )?,
        mode: if args.install {
            OutputMode::Live
        } else {
            OutputMode::Staging
        },
        staging_dir,
        daemon_config_path,
    })
}

fn template_path(flag: Option<&PathBuf>, configured: Option<&str>) -> Result<Option<PathBuf>> {
    match (flag, configured) {
        (Some(path), _) => Ok(Some(path.clone())),
        (None, Some(raw)) => Ok(Some(expand_path(raw)?)),
        (None, None) => Ok(None),
    }
}

fn print_pretty(ctx: &Context, report: &Report) {
    println!("{}", "Reality endpoint provisioned".bold());
    println!();
    println!("  {:<14} {}", "mode:".bold(), report.mode);
    println!("  {:<14} {}", "variant:".bold(), report.variant);
    println!("  {:<14} {}", "address:".bold(), report.server_address);
    println!("  {:<14} {}", "uuid:".bold(), report.client_id);
    println!("  {:<14} {}", "sni:".bold(), report.server_name);
    println!("  {:<14} {}", "short id:".bold(), report.short_id);
    println!("  {:<14} {}", "public key:".bold(), report.public_key);
    if let (Some(user), Some(pass)) = (&report.proxy_user, &report.proxy_pass) {
        println!("  {:<14} {}:{}", "proxy auth:".bold(), user, pass);
    }
    println!("  {:<14} {}", "server config:".bold(), report.server_config.display());
    println!("  {:<14} {}", "client config:".bold(), report.client_config.display());

    if let Some(service) = &report.service {
        let state = service
            .state
            .as_ref()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        println!("  {:<14} {} ({})", "service:".bold(), service.unit, state);
    }

    for warning in &report.warnings {
        println!();
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }

    println!();
    if ctx.no_color {
        println!("{}", report.uri);
    } else {
        println!("{}", report.uri.cyan());
    }
}
