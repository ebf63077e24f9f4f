/// User-supplied replacements for generated identity material.
///
/// Each field is either supplied or absent. Paired inputs (key halves,
/// credential halves) must be supplied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Client UUID
    pub client_id: Option<String>,

    /// Private half of the X25519 key pair
    pub private_key: Option<String>,

    /// Public half of the X25519 key pair
    pub public_key: Option<String>,

    /// Hex short-id
    pub short_id: Option<String>,

    /// SNI / camouflage domain
    pub server_name: Option<String>,

    /// Local proxy username
    pub proxy_user: Option<String>,

    /// Local proxy password
    pub proxy_pass: Option<String>,

    /// Generate a local proxy credential when none is supplied
    pub generate_credential: bool,
}

impl Overrides {
    /// Create an empty set of overrides (everything generated)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client UUID
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set both halves of the key pair
    #[must_use]
    pub fn key_pair(mut self, private: impl Into<String>, public: impl Into<String>) -> Self {
        self.private_key = Some(private.into());
        self.public_key = Some(public.into());
        self
    }

    /// Set the short-id
    #[must_use]
    pub fn short_id(mut self, short_id: impl Into<String>) -> Self {
        self.short_id = Some(short_id.into());
        self
    }

    /// Set the SNI
    #[must_use]
    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Set both halves of the local proxy credential
    #[must_use]
    pub fn credential(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.proxy_user = Some(user.into());
        self.proxy_pass = Some(pass.into());
        self
    }

    /// Ask for a generated local proxy credential
    #[must_use]
    pub const fn generate_credential(mut self, generate: bool) -> Self {
        self.generate_credential = generate;
        self
    }
}

/// Collapse an empty or whitespace-only value into "not supplied".
///
/// Input layers (CLI flags, env vars) use this so that downstream code never
/// sees an empty-string sentinel.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
