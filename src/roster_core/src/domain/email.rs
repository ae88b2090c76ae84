use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email regex is valid"));

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Invalid email address")]
    Invalid,
}

/// Case-normalized email address used as the authentication identifier.
///
/// Parsing trims surrounding whitespace and lowercases the input, so two
/// spellings of the same address always compare equal. The store relies on
/// this normalization for its uniqueness guarantee.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = raw.expose_secret().trim().to_lowercase();
        if !EMAIL_SHAPE.is_match(&normalized) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(Secret::from(normalized)))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
