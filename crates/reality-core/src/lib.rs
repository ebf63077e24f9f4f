//! Core types and errors for Reality tunnel provisioning.
//!
//! This crate provides the foundational types shared by the identity provider,
//! the config synthesizer and the CLI:
//!
//! - **Types**: [`IdentityMaterial`] and its parts, [`Overrides`], [`ProtocolVariant`]
//! - **Errors**: the run-aborting taxonomy in [`RealityError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use reality_core::{IdentityMaterial, KeyPair, Result};
//!
//! fn describe(identity: &IdentityMaterial) -> Result<()> {
//!     println!("client: {}", identity.client_id());
//!     println!("sni:    {}", identity.server_name());
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/reality-core/0.3.0")]

mod error;
pub mod types;
pub mod validate;

pub use error::{RealityError, Result};
pub use types::*;
