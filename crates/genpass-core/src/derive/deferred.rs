//! bcrypt-based derivation with progress.
//!
//! The salt is bound to the site (`secret + ":" + domain`), the bcrypt output
//! is then run through the sha512 hash chain so the result has the same shape
//! as the synchronous methods.

use async_trait::async_trait;
use sha2::{Digest, Sha512};

use super::sgp::hash_chain;
use super::{Backend, DerivationInput, DeriveError, HashMethod, Progress};

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Asynchronous backend for [`HashMethod::Bcrypt`].
///
/// The cost step runs on tokio's blocking pool so the session's event loop
/// keeps turning while it works.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptBackend;

fn site_salt(secret: &str, domain: &str) -> [u8; 16] {
    let digest = Sha512::digest(format!("{secret}:{domain}").as_bytes());
    let mut salt = [0u8; 16];
    salt.copy_from_slice(&digest[..16]);
    salt
}

fn derive_blocking(input: &DerivationInput, progress: &Progress) -> Result<String, DeriveError> {
    let salt = site_salt(&input.secret, &input.domain);
    let hashed = bcrypt::hash_with_salt(input.password.as_bytes(), input.cost_factor, salt)?
        .format_for_version(bcrypt::Version::TwoB);
    progress.report(1.0);
    hash_chain(hashed, input.length, HashMethod::Sha512)
}

#[async_trait]
impl Backend for BcryptBackend {
    async fn derive(
        &self,
        input: DerivationInput,
        progress: Progress,
    ) -> Result<String, DeriveError> {
        if input.method != HashMethod::Bcrypt {
            return Err(DeriveError::UnsupportedMethod {
                backend: "bcrypt",
                method: input.method,
            });
        }
        if !(MIN_COST..=MAX_COST).contains(&input.cost_factor) {
            return Err(DeriveError::InvalidCost(input.cost_factor));
        }

        progress.report(0.0);
        tokio::task::spawn_blocking(move || derive_blocking(&input, &progress))
            .await
            .map_err(|e| DeriveError::Worker(e.to_string()))?
    }
}
