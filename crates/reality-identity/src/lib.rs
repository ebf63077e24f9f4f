//! # reality-identity
//!
//! Resolves the identity material for one provisioning run.
//!
//! Every field is either taken from a user override or produced by a
//! generator. Generators draw from an injected random source, so a seeded
//! [`rand::rngs::StdRng`] pins the whole identity (SNI pick included) in tests.
//!
//! ```rust,ignore
//! use reality_identity::IdentityProvider;
//! use reality_core::Overrides;
//!
//! let mut provider = IdentityProvider::from_entropy();
//! let identity = provider.resolve(&Overrides::new().server_name("www.apple.com"))?;
//! println!("{}", identity.client_id());
//! ```

pub mod generator;
pub mod keys;
mod provider;
pub mod sni;

pub use generator::{KeyPairGenerator, X25519Generator, XrayKeyGenerator};
pub use provider::IdentityProvider;
pub use sni::SniCandidates;
