//! Password derivation backends.
//!
//! Two backends sit behind the [`Backend`] capability:
//! - [`SgpBackend`]: md5 / sha512 hash chains, computed synchronously and
//!   returned as a ready future
//! - [`BcryptBackend`]: cost-bearing bcrypt step on a blocking worker thread,
//!   reporting progress while it runs
//!
//! The orchestrator only sees `derive(input, progress) -> Result<String>`; it
//! never knows which variant resolved.

mod deferred;
mod error;
mod identicon;
mod request;
mod sgp;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use deferred::BcryptBackend;
pub use error::DeriveError;
pub use identicon::identicon_seed;
pub use request::{DerivationInput, DerivationRequest};
pub use sgp::{SgpBackend, MIN_LENGTH, MAX_LENGTH};

/// Hash method selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMethod {
    #[default]
    Md5,
    Sha512,
    /// Cost-factor bearing, runs asynchronously with progress.
    Bcrypt,
}

impl HashMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HashMethod::Md5 => "md5",
            HashMethod::Sha512 => "sha512",
            HashMethod::Bcrypt => "bcrypt",
        }
    }

    /// True for the method served by the asynchronous backend.
    pub fn is_async(self) -> bool {
        matches!(self, HashMethod::Bcrypt)
    }
}

impl fmt::Display for HashMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMethod {
    type Err = DeriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashMethod::Md5),
            "sha512" => Ok(HashMethod::Sha512),
            "bcrypt" => Ok(HashMethod::Bcrypt),
            other => Err(DeriveError::UnknownMethod(other.to_string())),
        }
    }
}

/// Progress sink handed to a backend. Fractions are in `[0, 1]`.
#[derive(Clone)]
pub struct Progress(Option<Arc<dyn Fn(f64) + Send + Sync>>);

impl Progress {
    pub fn new(report: impl Fn(f64) + Send + Sync + 'static) -> Self {
        Self(Some(Arc::new(report)))
    }

    /// A sink that drops every report.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn report(&self, fraction: f64) {
        if let Some(report) = &self.0 {
            report(fraction);
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Progress").field(&self.0.is_some()).finish()
    }
}

/// A derivation capability.
///
/// Implementations report zero or more progress fractions and then resolve
/// exactly once.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn derive(
        &self,
        input: DerivationInput,
        progress: Progress,
    ) -> Result<String, DeriveError>;
}

/// Routes each method to its backend.
#[derive(Clone)]
pub struct Backends {
    sync: Arc<dyn Backend>,
    deferred: Arc<dyn Backend>,
}

impl Backends {
    /// `sync` serves md5 / sha512, `deferred` serves bcrypt.
    pub fn new(sync: Arc<dyn Backend>, deferred: Arc<dyn Backend>) -> Self {
        Self { sync, deferred }
    }

    pub fn for_method(&self, method: HashMethod) -> Arc<dyn Backend> {
        if method.is_async() {
            Arc::clone(&self.deferred)
        } else {
            Arc::clone(&self.sync)
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::new(Arc::new(SgpBackend), Arc::new(BcryptBackend))
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}
