//! Educational features: explanations of what each command does.

use colored::Colorize;

use crate::deploy::OutputMode;

/// Command explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    writes: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            writes: Vec::new(),
            learn_more: None,
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn writes(mut self, target: &str) -> Self {
        self.writes.push(target.to_string());
        self
    }

    fn docs(mut self, url: &str) -> Self {
        self.learn_more = Some(url.to_string());
        self
    }

    /// Render the explanation without colors.
    pub fn render(&self) -> String {
        let mut out = format!("=== What This Does ===\n{}\n", self.description);

        if !self.what_happens.is_empty() {
            out.push_str("\nHow it works:\n");
            for (i, step) in self.what_happens.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }

        if !self.writes.is_empty() {
            out.push_str("\nFiles written:\n");
            for target in &self.writes {
                out.push_str(&format!("  - {target}\n"));
            }
        }

        if let Some(url) = &self.learn_more {
            out.push_str(&format!("\nLearn more: {url}\n"));
        }
        out
    }

    /// Print the explanation to stderr, keeping stdout for results.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", "=== What This Does ===".bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if !self.writes.is_empty() {
            eprintln!("{}", "Files written:".bold());
            for target in &self.writes {
                eprintln!("  - {}", target.dimmed());
            }
            eprintln!();
        }

        if let Some(url) = &self.learn_more {
            eprintln!("{} {}", "Learn more:".bold(), url.cyan().underline());
            eprintln!();
        }

        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn generate(address: &str, mode: OutputMode, server: &str, client: &str) -> Self {
        let explain = Self::new(&format!(
            "Provisions a VLESS+Reality endpoint reachable at {address}."
        ))
        .step("Uses the supplied UUID, key pair, short-id and SNI, generating whatever is missing")
        .step("Checks that a supplied key pair is a matched X25519 pair")
        .step("Loads the server and client templates and rewrites only the tagged nodes")
        .step("Puts the private key in the server config and the public key in the client config")
        .step("Builds the vless:// share link from the same identity")
        .writes(server)
        .writes(client)
        .docs("https://xtls.github.io/config/transport.html#realityobject");

        match mode {
            OutputMode::Staging => explain,
            OutputMode::Live => explain.step("Restarts the proxy service and reports its state"),
        }
    }

    pub fn keypair() -> Self {
        Self::new("Generates an X25519 key pair for the Reality handshake.")
            .step("The private key goes into the server's realitySettings")
            .step("The public key is shared with clients as `pbk`")
            .step("Keys are base64url without padding, as printed by `xray x25519`")
            .docs("https://xtls.github.io/config/transport.html#realityobject")
    }

    pub fn inspect() -> Self {
        Self::new("Decodes a vless:// share link into its parts.")
            .step("Reads the client UUID, server address and port")
            .step("Reads sni, pbk, sid, flow and fingerprint from the query")
            .step("Decodes the percent-encoded label after '#'")
    }
}
