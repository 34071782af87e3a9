//! Dependency version catalogs for the Stratum programming language.
//!
//! This crate provides:
//! - A builder that collects named dependency aliases and bundles
//! - Validation of alias and bundle names and of bundle references
//! - Interning of repeated groups, names and versions
//! - Immutable catalog snapshots that can be shared across threads
//! - Loading of catalog definition files (`[versions]`, `[libraries]`, `[bundles]`)

mod builder;
mod diagnostics;
mod intern;
mod loader;
mod model;
mod name;
mod property;
mod version;

pub use builder::{
    CatalogError, DependenciesModelBuilder, DEFAULT_LIBRARIES_EXTENSION_NAME,
    DEFAULT_PROJECTS_EXTENSION_NAME,
};
pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use intern::Interner;
pub use loader::{
    load_catalog, CatalogFile, Library, LibrarySpec, LibraryVersion, LoadError, RichVersion,
    VersionDeclaration, VersionReference,
};
pub use model::{AllDependenciesModel, DependencyModel};
pub use name::{is_valid_name, validate_name, NameKind, ALIAS_REGEX};
pub use property::Property;
pub use version::{MutableVersionConstraint, VersionConstraint, REJECT_ALL};
