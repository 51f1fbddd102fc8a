//! Derivation error type.

use super::HashMethod;

/// Failure of a derivation backend. Not expected for validated input; the
/// orchestrator treats it as fatal to the request and returns to idle.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("unknown hash method {0:?}")]
    UnknownMethod(String),
    #[error("{backend} backend cannot derive with method {method}")]
    UnsupportedMethod {
        backend: &'static str,
        method: HashMethod,
    },
    #[error("password length {0} outside 4..=24")]
    InvalidLength(u32),
    #[error("bcrypt cost {0} outside 4..=31")]
    InvalidCost(u32),
    #[error("no valid password after {0} hash rounds")]
    Exhausted(usize),
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("derivation worker failed: {0}")]
    Worker(String),
}
