//! Version constraints attached to catalog aliases.
//!
//! A [`MutableVersionConstraint`] is handed to the configurator passed to
//! [`DependenciesModelBuilder::alias`](crate::DependenciesModelBuilder::alias).
//! Once the configurator returns, the constraint is frozen into a
//! [`VersionConstraint`], which is what the catalog stores.

use serde::Serialize;

/// Rejection marker recorded by [`MutableVersionConstraint::reject_all`].
pub const REJECT_ALL: &str = "+";

/// A version constraint under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutableVersionConstraint {
    required: String,
    preferred: String,
    strict: String,
    rejected: Vec<String>,
    branch: Option<String>,
}

impl MutableVersionConstraint {
    /// Create a constraint seeded with a required version.
    #[must_use]
    pub fn new(required: impl Into<String>) -> Self {
        Self {
            required: required.into(),
            ..Self::default()
        }
    }

    /// Require the given version (or range). Clears any strict version.
    pub fn require(&mut self, version: impl Into<String>) -> &mut Self {
        self.required = version.into();
        self.strict.clear();
        self
    }

    /// Prefer the given version if nothing else decides.
    pub fn prefer(&mut self, version: impl Into<String>) -> &mut Self {
        self.preferred = version.into();
        self
    }

    /// Require exactly this version (or range), excluding anything outside it.
    pub fn strictly(&mut self, version: impl Into<String>) -> &mut Self {
        let version = version.into();
        self.required.clone_from(&version);
        self.strict = version;
        self
    }

    /// Reject a specific version (or range). Repeated calls accumulate.
    pub fn reject(&mut self, version: impl Into<String>) -> &mut Self {
        self.rejected.push(version.into());
        self
    }

    /// Reject every version.
    pub fn reject_all(&mut self) -> &mut Self {
        self.required.clear();
        self.preferred.clear();
        self.strict.clear();
        self.rejected = vec![REJECT_ALL.to_string()];
        self
    }

    /// Track a source branch instead of a published version.
    pub fn branch(&mut self, branch: impl Into<String>) -> &mut Self {
        self.branch = Some(branch.into());
        self
    }

    /// The currently required version.
    #[must_use]
    pub fn required_version(&self) -> &str {
        &self.required
    }
}

/// An immutable version constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VersionConstraint {
    #[serde(rename = "require", skip_serializing_if = "String::is_empty")]
    required: String,
    #[serde(rename = "prefer", skip_serializing_if = "String::is_empty")]
    preferred: String,
    #[serde(rename = "strictly", skip_serializing_if = "String::is_empty")]
    strict: String,
    #[serde(rename = "reject", skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
}

impl VersionConstraint {
    /// Shorthand for a constraint that only requires `version`.
    #[must_use]
    pub fn required(version: impl Into<String>) -> Self {
        Self::from(MutableVersionConstraint::new(version))
    }

    /// The required version, empty if none.
    #[must_use]
    pub fn required_version(&self) -> &str {
        &self.required
    }

    /// The preferred version, empty if none.
    #[must_use]
    pub fn preferred_version(&self) -> &str {
        &self.preferred
    }

    /// The strict version, empty if none.
    #[must_use]
    pub fn strict_version(&self) -> &str {
        &self.strict
    }

    /// Rejected versions, in declaration order.
    #[must_use]
    pub fn rejected_versions(&self) -> &[String] {
        &self.rejected
    }

    /// The tracked branch, if any.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Returns true if the constraint says nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
            && self.preferred.is_empty()
            && self.strict.is_empty()
            && self.rejected.is_empty()
            && self.branch.is_none()
    }
}

impl From<MutableVersionConstraint> for VersionConstraint {
    fn from(value: MutableVersionConstraint) -> Self {
        Self {
            required: value.required,
            preferred: value.preferred,
            strict: value.strict,
            rejected: value.rejected,
            branch: value.branch,
        }
    }
}

impl From<&MutableVersionConstraint> for VersionConstraint {
    fn from(value: &MutableVersionConstraint) -> Self {
        Self::from(value.clone())
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if !self.strict.is_empty() {
            // A strict version implies the same required version.
            parts.push(format!("strictly {}", self.strict));
        } else if !self.required.is_empty() {
            parts.push(format!("require {}", self.required));
        }
        if !self.preferred.is_empty() {
            parts.push(format!("prefer {}", self.preferred));
        }
        if !self.rejected.is_empty() {
            parts.push(format!("reject {}", self.rejected.join(" & ")));
        }
        if let Some(branch) = &self.branch {
            parts.push(format!("branch {branch}"));
        }
        write!(f, "{{{}}}", parts.join("; "))
    }
}
