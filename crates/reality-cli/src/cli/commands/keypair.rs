//! `realityctl keypair` - print a fresh X25519 key pair.

use anyhow::Result;
use colored::Colorize;
use rand::rngs::OsRng;
use reality::{KeyPairGenerator, X25519Generator, XrayKeyGenerator};
use serde::Serialize;

use super::Context;
use crate::cli::args::KeypairArgs;
use crate::education::Explain;

#[derive(Serialize)]
struct KeypairOutput<'a> {
    generator: &'a str,
    private_key: &'a str,
    public_key: &'a str,
}

pub async fn execute(ctx: Context, args: KeypairArgs) -> Result<()> {
    // Show explanation if requested
    if ctx.explain {
        Explain::keypair().print();
    }

    let mut generator: Box<dyn KeyPairGenerator> = match &args.xray_keys {
        Some(binary) => Box::new(XrayKeyGenerator::new(binary)),
        None => Box::new(X25519Generator::new(OsRng)),
    };
    let pair = generator.generate()?;

    let output = KeypairOutput {
        generator: generator.name(),
        private_key: &pair.private,
        public_key: &pair.public,
    };

    if ctx.emit(&output)? {
        return Ok(());
    }

    if ctx.no_color {
        println!("Private key: {}", pair.private);
        println!("Public key:  {}", pair.public);
    } else {
        println!("{} {}", "Private key:".bold(), pair.private.yellow());
        println!("{}  {}", "Public key:".bold(), pair.public.cyan());
    }

    Ok(())
}
