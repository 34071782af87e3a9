//! Accumulation of aliases and bundles into an [`AllDependenciesModel`].

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::intern::Interner;
use crate::model::{AllDependenciesModel, DependencyModel};
use crate::name::{validate_name, NameKind, ALIAS_REGEX};
use crate::property::Property;
use crate::version::{MutableVersionConstraint, VersionConstraint};
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

/// Default name of the extension exposing library aliases.
pub const DEFAULT_LIBRARIES_EXTENSION_NAME: &str = "libs";

/// Default name of the extension exposing project accessors.
pub const DEFAULT_PROJECTS_EXTENSION_NAME: &str = "projects";

/// Errors raised while declaring or building a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// An alias or bundle name does not match [`ALIAS_REGEX`].
    #[error("invalid {kind} name '{value}': it must match the following regular expression: {}", ALIAS_REGEX)]
    InvalidName { kind: NameKind, value: String },

    /// A bundle refers to an alias that was never declared.
    #[error("a bundle with name '{bundle}' declares a dependency on '{alias}' which doesn't exist")]
    UnknownBundleAlias { bundle: String, alias: String },
}

/// Collects catalog entries and freezes them into an [`AllDependenciesModel`].
///
/// The builder is single-threaded. Snapshots returned by [`build`](Self::build)
/// are independent of it and may be shared freely.
pub struct DependenciesModelBuilder {
    strings: Interner<str>,
    versions: Interner<VersionConstraint>,
    dependencies: IndexMap<Arc<str>, DependencyModel>,
    bundles: IndexMap<Arc<str>, Arc<[Arc<str>]>>,
    libraries_extension_name: Property<String>,
    projects_extension_name: Property<String>,
    sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for DependenciesModelBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesModelBuilder")
            .field("dependencies", &self.dependencies)
            .field("bundles", &self.bundles)
            .field("libraries_extension_name", &self.libraries_extension_name)
            .field("projects_extension_name", &self.projects_extension_name)
            .finish_non_exhaustive()
    }
}

impl Default for DependenciesModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DependenciesModelBuilder {
    /// Create a builder that reports warnings through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create a builder that reports warnings to `sink`.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            strings: Interner::new(),
            versions: Interner::new(),
            dependencies: IndexMap::new(),
            bundles: IndexMap::new(),
            libraries_extension_name: Property::new(DEFAULT_LIBRARIES_EXTENSION_NAME),
            projects_extension_name: Property::new(DEFAULT_PROJECTS_EXTENSION_NAME),
            sink,
        }
    }

    #[must_use]
    pub fn libraries_extension_name(&self) -> &Property<String> {
        &self.libraries_extension_name
    }

    pub fn libraries_extension_name_mut(&mut self) -> &mut Property<String> {
        &mut self.libraries_extension_name
    }

    #[must_use]
    pub fn projects_extension_name(&self) -> &Property<String> {
        &self.projects_extension_name
    }

    pub fn projects_extension_name_mut(&mut self) -> &mut Property<String> {
        &mut self.projects_extension_name
    }

    /// Declare `alias` as `group:name`, with a version set up by `configure`.
    ///
    /// `configure` runs once against a constraint whose required version is
    /// empty. Redeclaring an alias replaces the previous entry and emits a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidName`] if `alias` is not a valid name.
    /// Nothing is recorded in that case.
    pub fn alias<F>(
        &mut self,
        alias: &str,
        group: &str,
        name: &str,
        configure: F,
    ) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut MutableVersionConstraint),
    {
        validate_name(NameKind::Alias, alias)?;

        let mut constraint = MutableVersionConstraint::new("");
        configure(&mut constraint);
        let version = self.versions.intern(VersionConstraint::from(constraint));

        let model = DependencyModel::new(
            self.strings.intern(group),
            self.strings.intern(name),
            version,
        );
        let key = self.strings.intern(alias);
        tracing::debug!(alias, dependency = %model, "declared catalog alias");

        if let Some(previous) = self.dependencies.insert(key, model.clone()) {
            self.sink.warn(&format!(
                "duplicate entry for alias '{alias}': {previous} is replaced with {model}"
            ));
        }
        Ok(())
    }

    /// Declare `alias` as `group:name` requiring `version`.
    ///
    /// # Errors
    ///
    /// Same as [`alias`](Self::alias).
    pub fn alias_with_version(
        &mut self,
        alias: &str,
        group: &str,
        name: &str,
        version: &str,
    ) -> Result<(), CatalogError> {
        self.alias(alias, group, name, |constraint| {
            constraint.require(version);
        })
    }

    /// Declare a bundle grouping `aliases`, kept in the given order.
    ///
    /// Aliases are not checked here; they only need to exist by the time
    /// [`build`](Self::build) runs. Repeated aliases are kept as-is.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidName`] if `bundle` is not a valid name.
    pub fn bundle<I, S>(&mut self, bundle: &str, aliases: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_name(NameKind::Bundle, bundle)?;

        let aliases: Arc<[Arc<str>]> = aliases
            .into_iter()
            .map(|alias| self.strings.intern(alias.as_ref()))
            .collect();
        let key = self.strings.intern(bundle);
        tracing::debug!(bundle, size = aliases.len(), "declared catalog bundle");

        if let Some(previous) = self.bundles.insert(key, Arc::clone(&aliases)) {
            self.sink.warn(&format!(
                "duplicate entry for bundle '{bundle}': {} is replaced with {}",
                format_aliases(&previous),
                format_aliases(&aliases)
            ));
        }
        Ok(())
    }

    /// Check every bundle reference and snapshot the catalog.
    ///
    /// The builder stays usable afterwards; later changes do not affect
    /// snapshots already returned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownBundleAlias`] for the first bundle
    /// alias that was never declared.
    pub fn build(&self) -> Result<AllDependenciesModel, CatalogError> {
        for (bundle, aliases) in &self.bundles {
            if let Some(missing) = aliases
                .iter()
                .find(|alias| !self.dependencies.contains_key(&***alias))
            {
                return Err(CatalogError::UnknownBundleAlias {
                    bundle: bundle.to_string(),
                    alias: missing.to_string(),
                });
            }
        }

        tracing::debug!(
            dependencies = self.dependencies.len(),
            bundles = self.bundles.len(),
            "built dependency catalog"
        );
        Ok(AllDependenciesModel::new(
            self.dependencies.clone(),
            self.bundles.clone(),
        ))
    }
}

fn format_aliases(aliases: &[Arc<str>]) -> String {
    let joined = aliases
        .iter()
        .map(|alias| &**alias)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
