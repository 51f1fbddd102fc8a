//! md5 / sha512 hash-chain derivation.
//!
//! `password + secret + ":" + domain` is hashed at least [`MIN_ROUNDS`] times,
//! and further until the first `length` characters start with a lowercase
//! letter and contain an uppercase letter and a digit.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::Md5;
use sha2::{Digest, Sha512};

use super::{Backend, DerivationInput, DeriveError, HashMethod, Progress};

pub const MIN_LENGTH: u32 = 4;
pub const MAX_LENGTH: u32 = 24;

const MIN_ROUNDS: usize = 10;
/// Upper bound on the search for a valid prefix; never reached in practice.
const MAX_ROUNDS: usize = 10_000;

/// Synchronous backend for md5 and sha512.
#[derive(Debug, Clone, Copy, Default)]
pub struct SgpBackend;

impl SgpBackend {
    /// Derive immediately on the calling thread.
    pub fn derive_now(&self, input: &DerivationInput) -> Result<String, DeriveError> {
        if input.method.is_async() {
            return Err(DeriveError::UnsupportedMethod {
                backend: "sgp",
                method: input.method,
            });
        }
        let seed = format!("{}{}:{}", input.password, input.secret, input.domain);
        hash_chain(seed, input.length, input.method)
    }
}

#[async_trait]
impl Backend for SgpBackend {
    async fn derive(
        &self,
        input: DerivationInput,
        _progress: Progress,
    ) -> Result<String, DeriveError> {
        self.derive_now(&input)
    }
}

/// Base64 of the digest with `+`, `/`, `=` replaced by `9`, `8`, `A`.
fn custom_base64(digest: &[u8]) -> String {
    STANDARD
        .encode(digest)
        .chars()
        .map(|c| match c {
            '+' => '9',
            '/' => '8',
            '=' => 'A',
            c => c,
        })
        .collect()
}

fn hash_once(value: &str, method: HashMethod) -> String {
    match method {
        HashMethod::Md5 => custom_base64(&Md5::digest(value.as_bytes())),
        HashMethod::Sha512 | HashMethod::Bcrypt => custom_base64(&Sha512::digest(value.as_bytes())),
    }
}

fn is_valid_prefix(value: &str, length: usize) -> bool {
    let prefix = &value.as_bytes()[..length.min(value.len())];
    prefix.first().is_some_and(u8::is_ascii_lowercase)
        && prefix.iter().any(u8::is_ascii_uppercase)
        && prefix.iter().any(u8::is_ascii_digit)
}

/// Hash `seed` repeatedly with `method` and cut the result to `length`.
///
/// The bcrypt backend reuses this with [`HashMethod::Sha512`] after its cost step.
pub(super) fn hash_chain(
    seed: String,
    length: u32,
    method: HashMethod,
) -> Result<String, DeriveError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(DeriveError::InvalidLength(length));
    }
    let length = length as usize;

    let mut value = seed;
    let mut rounds = 0;
    while rounds < MIN_ROUNDS || !is_valid_prefix(&value, length) {
        if rounds >= MAX_ROUNDS {
            return Err(DeriveError::Exhausted(rounds));
        }
        value = hash_once(&value, method);
        rounds += 1;
    }
    // Custom base64 output is pure ASCII.
    value.truncate(length);
    Ok(value)
}
