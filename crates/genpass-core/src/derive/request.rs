//! Derivation request types.

use std::fmt;

use super::HashMethod;

/// A validated derivation request, scoped to one generate action.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivationRequest {
    /// Never persisted.
    pub master_password: String,
    pub master_secret: String,
    /// Canonical domain.
    pub domain: String,
    pub length: u32,
    pub method: HashMethod,
    pub cost_factor: u32,
    pub counter: u32,
    pub remove_subdomains: bool,
}

impl DerivationRequest {
    /// Backend input. A nonzero counter is appended to the master password
    /// so a single site's password can be rotated without touching secrets.
    pub fn to_input(&self) -> DerivationInput {
        let mut password = self.master_password.clone();
        if self.counter != 0 {
            password.push_str(&self.counter.to_string());
        }
        DerivationInput {
            password,
            secret: self.master_secret.clone(),
            domain: self.domain.clone(),
            length: self.length,
            method: self.method,
            cost_factor: self.cost_factor,
        }
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("master_password", &"<redacted>")
            .field("domain", &self.domain)
            .field("length", &self.length)
            .field("method", &self.method)
            .field("cost_factor", &self.cost_factor)
            .field("counter", &self.counter)
            .field("remove_subdomains", &self.remove_subdomains)
            .finish_non_exhaustive()
    }
}

/// What a backend hashes.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivationInput {
    /// Master password with the counter suffix applied.
    pub password: String,
    pub secret: String,
    pub domain: String,
    pub length: u32,
    pub method: HashMethod,
    /// Only read by the bcrypt backend.
    pub cost_factor: u32,
}

impl fmt::Debug for DerivationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationInput")
            .field("domain", &self.domain)
            .field("length", &self.length)
            .field("method", &self.method)
            .field("cost_factor", &self.cost_factor)
            .finish_non_exhaustive()
    }
}
