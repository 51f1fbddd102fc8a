//! Seed for the identicon drawn next to the password field.
//!
//! The picture lets users notice a mistyped master password before
//! generating; only the seed is computed here, rendering is the UI's job.

use md5::Md5;
use sha2::{Digest, Sha512};

use super::HashMethod;

const SEED_ROUNDS: usize = 5;

/// Hex seed for the identicon, or `None` when both inputs are empty.
pub fn identicon_seed(password: &str, secret: &str, method: HashMethod) -> Option<String> {
    if password.is_empty() && secret.is_empty() {
        return None;
    }

    let mut seed = format!("{password}{secret}");
    for _ in 0..SEED_ROUNDS {
        seed = match method {
            HashMethod::Sha512 => hex::encode(Sha512::digest(seed.as_bytes())),
            HashMethod::Md5 | HashMethod::Bcrypt => hex::encode(Md5::digest(seed.as_bytes())),
        };
    }
    Some(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_have_no_seed() {
        assert_eq!(identicon_seed("", "", HashMethod::Md5), None);
    }

    #[test]
    fn seed_length_follows_method() {
        assert_eq!(identicon_seed("pw", "", HashMethod::Md5).unwrap().len(), 32);
        assert_eq!(identicon_seed("", "s", HashMethod::Bcrypt).unwrap().len(), 32);
        assert_eq!(identicon_seed("pw", "s", HashMethod::Sha512).unwrap().len(), 128);
    }

    #[test]
    fn seed_depends_on_both_inputs() {
        let a = identicon_seed("pw", "s", HashMethod::Md5);
        assert_eq!(a, identicon_seed("pw", "s", HashMethod::Md5));
        assert_ne!(a, identicon_seed("pw", "t", HashMethod::Md5));
    }
}
