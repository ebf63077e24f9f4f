//! Identity material resolution: overrides first, generators second.

use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use reality_core::{
    validate, IdentityMaterial, KeyPair, Overrides, ProxyCredential, RealityError, Result,
};
use tracing::{debug, info};
use uuid::Builder;

use crate::generator::{KeyPairGenerator, X25519Generator};
use crate::keys;
use crate::sni::SniCandidates;

/// Short-id length in bytes (16 hex chars)
const DEFAULT_SHORT_ID_BYTES: usize = 8;

/// Generated proxy username length in bytes
const CREDENTIAL_USER_BYTES: usize = 4;

/// Generated proxy password length in bytes
const CREDENTIAL_PASS_BYTES: usize = 12;

/// Resolves [`IdentityMaterial`] from overrides and generators.
///
/// The random source is injected: production code uses
/// [`IdentityProvider::from_entropy`], tests pass a seeded [`StdRng`] to
/// [`IdentityProvider::with_rng`] and get a reproducible identity.
pub struct IdentityProvider<R> {
    rng: R,
    keys: Box<dyn KeyPairGenerator>,
    sni: SniCandidates,
    short_id_bytes: usize,
}

impl IdentityProvider<StdRng> {
    /// Provider seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            keys: Box::new(X25519Generator::new(OsRng)),
            sni: SniCandidates::default(),
            short_id_bytes: DEFAULT_SHORT_ID_BYTES,
        }
    }
}

impl<R: RngCore + CryptoRng> IdentityProvider<R> {
    /// Provider drawing everything, key pair included, from `rng`
    pub fn with_rng(mut rng: R) -> Self {
        let mut seed = <StdRng as SeedableRng>::Seed::default();
        rng.fill_bytes(&mut seed);
        Self {
            rng,
            keys: Box::new(X25519Generator::new(StdRng::from_seed(seed))),
            sni: SniCandidates::default(),
            short_id_bytes: DEFAULT_SHORT_ID_BYTES,
        }
    }

    /// Replace the SNI candidate list
    #[must_use]
    pub fn with_sni_candidates(mut self, candidates: SniCandidates) -> Self {
        self.sni = candidates;
        self
    }

    /// Replace the key-pair generator
    #[must_use]
    pub fn with_key_generator(mut self, generator: Box<dyn KeyPairGenerator>) -> Self {
        self.keys = generator;
        self
    }

    /// Change the generated short-id length (1..=8 bytes)
    #[must_use]
    pub fn with_short_id_bytes(mut self, bytes: usize) -> Self {
        self.short_id_bytes = bytes.clamp(1, validate::MAX_SHORT_ID_LEN / 2);
        self
    }

    /// Resolve every identity field.
    ///
    /// Fails with [`RealityError::InvalidOverride`] for unusable overrides
    /// (half a pair, wrong format, explicitly empty) and with
    /// [`RealityError::GenerationFailed`] when a generator misbehaves.
    pub fn resolve(&mut self, overrides: &Overrides) -> Result<IdentityMaterial> {
        // Paired inputs are checked before anything is generated.
        let supplied_pair = supplied_key_pair(overrides)?;
        let supplied_credential = supplied_credential(overrides)?;

        let client_id = self.resolve_client_id(overrides.client_id.as_deref())?;
        let key_pair = self.resolve_key_pair(supplied_pair)?;
        let short_id = self.resolve_short_id(overrides.short_id.as_deref())?;
        let server_name = self.resolve_server_name(overrides.server_name.as_deref())?;
        let proxy_credential = match supplied_credential {
            Some(credential) => {
                debug!(field = "proxy_credential", source = "override", "resolved");
                Some(credential)
            }
            None if overrides.generate_credential => {
                debug!(field = "proxy_credential", source = "generated", "resolved");
                Some(ProxyCredential::new(
                    self.random_hex(CREDENTIAL_USER_BYTES),
                    self.random_hex(CREDENTIAL_PASS_BYTES),
                ))
            }
            None => None,
        };

        info!(
            server_name = %server_name,
            short_id = %short_id,
            proxy_auth = proxy_credential.is_some(),
            "identity material resolved"
        );

        IdentityMaterial::new(client_id, key_pair, short_id, server_name, proxy_credential)
    }

    fn resolve_client_id(&mut self, supplied: Option<&str>) -> Result<String> {
        if let Some(id) = supplied {
            validate::client_id(id)
                .map_err(|reason| RealityError::invalid_override("client_id", reason))?;
            debug!(field = "client_id", source = "override", "resolved");
            return Ok(id.to_string());
        }

        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        let id = Builder::from_random_bytes(bytes).into_uuid().to_string();
        validate::client_id(&id)
            .map_err(|reason| RealityError::generation_failed("client id", reason))?;
        debug!(field = "client_id", source = "generated", "resolved");
        Ok(id)
    }

    fn resolve_key_pair(&mut self, supplied: Option<KeyPair>) -> Result<KeyPair> {
        if let Some(pair) = supplied {
            keys::verify_pair(&pair)
                .map_err(|reason| RealityError::invalid_override("key_pair", reason))?;
            debug!(field = "key_pair", source = "override", "resolved");
            return Ok(pair);
        }

        let pair = self.keys.generate()?;
        if pair.private.is_empty() || pair.public.is_empty() {
            return Err(RealityError::generation_failed(
                "key pair",
                format!("{} generator returned an empty key", self.keys.name()),
            ));
        }
        keys::verify_pair(&pair)
            .map_err(|reason| RealityError::generation_failed("key pair", reason))?;
        debug!(field = "key_pair", source = self.keys.name(), "resolved");
        Ok(pair)
    }

    fn resolve_short_id(&mut self, supplied: Option<&str>) -> Result<String> {
        if let Some(short_id) = supplied {
            validate::short_id(short_id)
                .map_err(|reason| RealityError::invalid_override("short_id", reason))?;
            debug!(field = "short_id", source = "override", "resolved");
            return Ok(short_id.to_string());
        }

        let short_id = self.random_hex(self.short_id_bytes);
        validate::short_id(&short_id)
            .map_err(|reason| RealityError::generation_failed("short id", reason))?;
        debug!(field = "short_id", source = "generated", "resolved");
        Ok(short_id)
    }

    fn resolve_server_name(&mut self, supplied: Option<&str>) -> Result<String> {
        if let Some(name) = supplied {
            validate::server_name(name)
                .map_err(|reason| RealityError::invalid_override("server_name", reason))?;
            debug!(field = "server_name", source = "override", "resolved");
            return Ok(name.to_string());
        }

        let picked = self
            .sni
            .pick(&mut self.rng)
            .ok_or_else(|| RealityError::generation_failed("server name", "no SNI candidates"))?
            .to_string();
        validate::server_name(&picked)
            .map_err(|reason| RealityError::generation_failed("server name", reason))?;
        debug!(field = "server_name", source = "candidates", "resolved");
        Ok(picked)
    }

    fn random_hex(&mut self, len: usize) -> String {
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Key halves must come together and must not be empty.
fn supplied_key_pair(overrides: &Overrides) -> Result<Option<KeyPair>> {
    match (&overrides.private_key, &overrides.public_key) {
        (None, None) => Ok(None),
        (Some(private), Some(public)) => {
            if private.is_empty() || public.is_empty() {
                return Err(RealityError::invalid_override(
                    "key_pair",
                    "key halves must not be empty",
                ));
            }
            Ok(Some(KeyPair::new(private.clone(), public.clone())))
        }
        (Some(_), None) => Err(RealityError::invalid_override(
            "key_pair",
            "private key supplied without public key",
        )),
        (None, Some(_)) => Err(RealityError::invalid_override(
            "key_pair",
            "public key supplied without private key",
        )),
    }
}

/// Credential halves must come together and must not be empty.
fn supplied_credential(overrides: &Overrides) -> Result<Option<ProxyCredential>> {
    match (&overrides.proxy_user, &overrides.proxy_pass) {
        (None, None) => Ok(None),
        (Some(user), Some(pass)) => {
            if user.is_empty() || pass.is_empty() {
                return Err(RealityError::invalid_override(
                    "proxy_credential",
                    "user and password must not be empty",
                ));
            }
            Ok(Some(ProxyCredential::new(user.clone(), pass.clone())))
        }
        (Some(_), None) => Err(RealityError::invalid_override(
            "proxy_credential",
            "user supplied without password",
        )),
        (None, Some(_)) => Err(RealityError::invalid_override(
            "proxy_credential",
            "password supplied without user",
        )),
    }
}
