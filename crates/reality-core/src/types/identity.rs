use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RealityError, Result};
use crate::validate;

/// Port the camouflage destination and the share link always use
pub const REALITY_PORT: u16 = 443;

/// X25519 key pair, both halves encoded the way `xray x25519` prints them
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Private half, only ever written into the server document
    pub private: String,
    /// Public half, only ever written into the client document and the URI
    pub public: String,
}

impl KeyPair {
    /// Create a key pair from its two encoded halves
    #[must_use]
    pub fn new(private: impl Into<String>, public: impl Into<String>) -> Self {
        Self {
            private: private.into(),
            public: public.into(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Basic-auth pair for the local SOCKS/HTTP listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyCredential {
    /// Username
    pub user: String,
    /// Password
    pub pass: String,
}

impl ProxyCredential {
    /// Create a credential pair
    #[must_use]
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

/// Identity material for one provisioning run.
///
/// Built once, consumed by one server synthesis, one client synthesis and
/// one URI encoding, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMaterial {
    client_id: String,
    key_pair: KeyPair,
    short_id: String,
    server_name: String,
    proxy_credential: Option<ProxyCredential>,
}

impl IdentityMaterial {
    /// Assemble identity material from already-resolved parts.
    ///
    /// Only the shape checks every consumer depends on are done here
    /// (non-empty fields, hex short-id). Key-pair matching and UUID format
    /// are the identity provider's job.
    pub fn new(
        client_id: impl Into<String>,
        key_pair: KeyPair,
        short_id: impl Into<String>,
        server_name: impl Into<String>,
        proxy_credential: Option<ProxyCredential>,
    ) -> Result<Self> {
        let client_id = client_id.into();
        let short_id = short_id.into();
        let server_name = server_name.into();

        if client_id.is_empty() {
            return Err(RealityError::Config("client id must not be empty".into()));
        }
        if key_pair.private.is_empty() || key_pair.public.is_empty() {
            return Err(RealityError::Config("key pair halves must not be empty".into()));
        }
        if server_name.is_empty() {
            return Err(RealityError::Config("server name must not be empty".into()));
        }
        validate::short_id(&short_id).map_err(RealityError::Config)?;

        Ok(Self {
            client_id,
            key_pair,
            short_id,
            server_name,
            proxy_credential,
        })
    }

    /// UUID of the authorized tunnel user
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The X25519 key pair
    #[must_use]
    pub const fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Hex short-id shared by server and client
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    /// SNI presented by the client and accepted by the server
    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Optional local-proxy credential
    #[must_use]
    pub const fn proxy_credential(&self) -> Option<&ProxyCredential> {
        self.proxy_credential.as_ref()
    }

    /// Camouflage upstream, `serverName:443`
    #[must_use]
    pub fn camouflage_dest(&self) -> String {
        format!("{}:{}", self.server_name, REALITY_PORT)
    }
}
