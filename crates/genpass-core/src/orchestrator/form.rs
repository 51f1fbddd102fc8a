//! Raw form snapshot handed to the generate action.

use serde::Deserialize;

use crate::derive::HashMethod;

/// Field values as typed, before validation.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub password: String,
    pub secret: String,
    pub domain: String,
    pub length: String,
    pub method: String,
    pub cost: String,
    pub counter: String,
    pub disable_tld: bool,
}

impl FormInput {
    /// Selected method; anything unrecognised means md5.
    pub fn hash_method(&self) -> HashMethod {
        self.method.parse().unwrap_or_default()
    }
}

impl std::fmt::Debug for FormInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInput")
            .field("domain", &self.domain)
            .field("length", &self.length)
            .field("method", &self.method)
            .field("cost", &self.cost)
            .field("counter", &self.counter)
            .field("disable_tld", &self.disable_tld)
            .finish_non_exhaustive()
    }
}
