//! The frozen catalog produced by [`DependenciesModelBuilder::build`](crate::DependenciesModelBuilder::build).

use crate::version::VersionConstraint;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// A single dependency coordinate with its version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyModel {
    group: Arc<str>,
    name: Arc<str>,
    version: Arc<VersionConstraint>,
}

impl DependencyModel {
    /// Create a model from already interned parts.
    #[must_use]
    pub fn new(group: Arc<str>, name: Arc<str>, version: Arc<VersionConstraint>) -> Self {
        Self {
            group,
            name,
            version,
        }
    }

    /// The group, e.g. `org.example`.
    #[must_use]
    pub fn group(&self) -> &Arc<str> {
        &self.group
    }

    /// The artifact name within the group.
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// The version constraint.
    #[must_use]
    pub fn version(&self) -> &Arc<VersionConstraint> {
        &self.version
    }

    /// The `group:name` module identifier.
    #[must_use]
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl std::fmt::Display for DependencyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// An immutable snapshot of every alias and bundle in a catalog.
///
/// Entries keep the order in which they were first declared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AllDependenciesModel {
    #[serde(rename = "libraries")]
    dependencies: IndexMap<Arc<str>, DependencyModel>,
    bundles: IndexMap<Arc<str>, Arc<[Arc<str>]>>,
}

impl AllDependenciesModel {
    pub(crate) fn new(
        dependencies: IndexMap<Arc<str>, DependencyModel>,
        bundles: IndexMap<Arc<str>, Arc<[Arc<str>]>>,
    ) -> Self {
        Self {
            dependencies,
            bundles,
        }
    }

    /// Look up the dependency declared under `alias`.
    #[must_use]
    pub fn dependency(&self, alias: &str) -> Option<&DependencyModel> {
        self.dependencies.get(alias)
    }

    /// Look up the aliases grouped under `bundle`, in declaration order.
    #[must_use]
    pub fn bundle(&self, bundle: &str) -> Option<&[Arc<str>]> {
        self.bundles.get(bundle).map(|aliases| &aliases[..])
    }

    /// Resolve every alias of `bundle` to its dependency.
    #[must_use]
    pub fn resolve_bundle(&self, bundle: &str) -> Option<Vec<&DependencyModel>> {
        let aliases = self.bundles.get(bundle)?;
        aliases
            .iter()
            .map(|alias| self.dependencies.get(&**alias))
            .collect()
    }

    /// Iterate over all aliases and their dependencies.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &DependencyModel)> {
        self.dependencies.iter().map(|(k, v)| (&**k, v))
    }

    /// Iterate over all bundles and their aliases.
    pub fn bundles(&self) -> impl Iterator<Item = (&str, &[Arc<str>])> {
        self.bundles.iter().map(|(k, v)| (&**k, &v[..]))
    }

    /// Number of declared aliases.
    #[must_use]
    pub fn dependencies_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Number of declared bundles.
    #[must_use]
    pub fn bundles_count(&self) -> usize {
        self.bundles.len()
    }

    /// Returns true if the catalog declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.bundles.is_empty()
    }

    /// Render the snapshot as TOML, mainly for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
