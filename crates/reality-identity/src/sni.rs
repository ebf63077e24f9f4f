//! Camouflage SNI candidates.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Domains that serve TLS 1.3 + HTTP/2 on 443 and make plausible cover
const DEFAULT_CANDIDATES: &[&str] = &[
    "www.microsoft.com",
    "www.apple.com",
    "dl.google.com",
    "www.amazon.com",
    "addons.mozilla.org",
    "www.cloudflare.com",
    "www.nvidia.com",
    "www.samsung.com",
];

/// List of domains an SNI is drawn from when none is supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SniCandidates(Vec<String>);

impl Default for SniCandidates {
    fn default() -> Self {
        Self(DEFAULT_CANDIDATES.iter().map(ToString::to_string).collect())
    }
}

impl SniCandidates {
    /// Use exactly these candidates
    #[must_use]
    pub const fn new(candidates: Vec<String>) -> Self {
        Self(candidates)
    }

    /// Pick one candidate uniformly at random
    pub fn pick<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.0.choose(rng).map(String::as_str)
    }

    /// All candidates in order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for SniCandidates {
    fn from(candidates: Vec<String>) -> Self {
        Self(candidates)
    }
}
