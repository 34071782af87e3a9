//! Naming rules shared by aliases and bundles.

use crate::builder::CatalogError;
use regex::Regex;
use std::sync::OnceLock;

/// The pattern every alias and bundle name must match in full.
pub const ALIAS_REGEX: &str = r"[a-z]([a-zA-Z0-9_.\-])+";

/// What kind of catalog entry a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// A dependency alias.
    Alias,
    /// A bundle of aliases.
    Bundle,
}

impl NameKind {
    /// Returns the kind as a lowercase word.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Bundle => "bundle",
        }
    }
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn alias_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("^(?:{ALIAS_REGEX})$")).expect("alias pattern is a valid regex")
    })
}

/// Returns true if `value` is an acceptable alias or bundle name.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    alias_pattern().is_match(value)
}

/// Validate an alias or bundle name.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidName`] if `value` does not match [`ALIAS_REGEX`].
pub fn validate_name(kind: NameKind, value: &str) -> Result<(), CatalogError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(CatalogError::InvalidName {
            kind,
            value: value.to_string(),
        })
    }
}
