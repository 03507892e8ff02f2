//! Credential handling
//!
//! Connection strings carry passwords, so they are held in a
//! [`secrecy::Secret`] whose inner value is zeroized on drop and redacted in
//! `Debug` output. Call `expose_secret()` only at the point of use.
//!
//! # Example
//!
//! ```rust
//! use relex::config::{redacted_dsn, secret_string};
//! use secrecy::ExposeSecret;
//!
//! let dsn = secret_string("postgresql://relex:hunter2@db:5432/reports".to_string());
//! assert!(dsn.expose_secret().starts_with("postgresql://"));
//! assert_eq!(redacted_dsn(&dsn), "postgresql://***@db:5432/reports");
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload of a [`SecretString`], wiped on drop
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// Borrow the raw value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Parse the raw value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroize-on-drop, debug-redacted string
pub type SecretString = Secret<SecretValue>;

/// Wrap a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Render a connection string with its credentials removed, for logs
///
/// Everything before the last `@` is replaced; strings without credentials
/// keep only their scheme.
pub fn redacted_dsn(value: &SecretString) -> String {
    let raw = value.expose_secret().as_str();
    let scheme = raw.split_once("://").map(|(s, _)| s).unwrap_or("postgresql");

    match raw.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => format!("{scheme}://***"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expose_returns_value() {
        let secret = secret_string("s3cr3t".to_string());
        assert_eq!(secret.expose_secret(), "s3cr3t");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_string("postgresql://u:topsecret@h/db".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("topsecret"));
    }

    #[test]
    fn test_redacted_dsn() {
        let dsn = secret_string("postgres://user:pw@host:5432/db".to_string());
        assert_eq!(redacted_dsn(&dsn), "postgres://***@host:5432/db");

        let bare = secret_string("postgresql://localhost/db".to_string());
        assert_eq!(redacted_dsn(&bare), "postgresql://***");
    }

    #[test]
    fn test_toml_round_trip_of_secret_field() {
        #[derive(Serialize, Deserialize)]
        struct Section {
            connection_string: SecretString,
        }

        let section: Section = toml::from_str("connection_string = \"postgresql://a@b/c\"").unwrap();
        assert_eq!(section.connection_string.expose_secret(), "postgresql://a@b/c");

        let rendered = toml::to_string(&section).unwrap();
        assert!(rendered.contains("postgresql://a@b/c"));
    }
}
