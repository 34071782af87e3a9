//! Catalog definition files.
//!
//! A catalog file declares shared versions, library aliases and bundles:
//!
//! ```toml
//! [versions]
//! serde = "1.0.200"
//!
//! [libraries]
//! serde = { group = "io.serde", name = "serde", version.ref = "serde" }
//! serde-json = { module = "io.serde:serde_json", version = { require = "1.0", reject = ["1.0.1"] } }
//! anyhow = "io.anyhow:anyhow:1.0"
//!
//! [bundles]
//! serde = ["serde", "serde-json"]
//! ```
//!
//! Loading a file only drives a [`DependenciesModelBuilder`]; every naming
//! and bundle rule is enforced by the builder itself.

use crate::builder::{CatalogError, DependenciesModelBuilder};
use crate::model::AllDependenciesModel;
use crate::version::MutableVersionConstraint;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a catalog file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid dependency notation '{notation}' for alias '{alias}', expected 'group:name' or 'group:name:version'")]
    InvalidNotation { alias: String, notation: String },

    #[error("alias '{alias}' must declare either 'module' or both 'group' and 'name'")]
    MissingCoordinates { alias: String },

    #[error("alias '{alias}' declares both 'module' and 'group'/'name'")]
    AmbiguousCoordinates { alias: String },

    #[error("alias '{alias}' references version '{reference}' which isn't declared in [versions]")]
    UnknownVersionRef { alias: String, reference: String },
}

/// A parsed catalog file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Named versions that libraries can reference.
    #[serde(default)]
    pub versions: IndexMap<String, VersionDeclaration>,

    /// Library aliases.
    #[serde(default)]
    pub libraries: IndexMap<String, LibrarySpec>,

    /// Bundles of library aliases.
    #[serde(default)]
    pub bundles: IndexMap<String, Vec<String>>,
}

/// A version written out in full, either as a plain string or a rich table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VersionDeclaration {
    /// `"1.0"`, shorthand for `{ require = "1.0" }`.
    Simple(String),
    /// `{ require = "1.0", reject = ["1.0.1"] }`.
    Rich(RichVersion),
}

/// The table form of a version declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RichVersion {
    #[serde(default)]
    pub require: Option<String>,
    #[serde(default)]
    pub strictly: Option<String>,
    #[serde(default)]
    pub prefer: Option<String>,
    #[serde(default)]
    pub reject: Vec<String>,
    #[serde(default, rename = "reject-all")]
    pub reject_all: bool,
    #[serde(default)]
    pub branch: Option<String>,
}

/// The version of a library: a reference into `[versions]` or a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LibraryVersion {
    /// `version.ref = "name"`.
    Reference(VersionReference),
    Declared(VersionDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionReference {
    #[serde(rename = "ref")]
    pub name: String,
}

/// A library entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LibrarySpec {
    /// `"group:name"` or `"group:name:version"`.
    Notation(String),
    Detailed(Library),
}

/// The table form of a library entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Library {
    /// `group:name` shorthand for the two fields below.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<LibraryVersion>,
}

impl VersionDeclaration {
    /// Apply this declaration to a constraint under construction.
    pub fn configure(&self, constraint: &mut MutableVersionConstraint) {
        match self {
            Self::Simple(version) => {
                constraint.require(version.as_str());
            }
            Self::Rich(rich) => {
                if let Some(require) = &rich.require {
                    constraint.require(require.as_str());
                }
                if let Some(strictly) = &rich.strictly {
                    constraint.strictly(strictly.as_str());
                }
                if let Some(prefer) = &rich.prefer {
                    constraint.prefer(prefer.as_str());
                }
                for rejected in &rich.reject {
                    constraint.reject(rejected.as_str());
                }
                if let Some(branch) = &rich.branch {
                    constraint.branch(branch.as_str());
                }
                if rich.reject_all {
                    constraint.reject_all();
                }
            }
        }
    }
}

/// Coordinates of a library once its notation has been unpacked.
struct Coordinates {
    group: String,
    name: String,
    version: Option<VersionDeclaration>,
}

impl CatalogFile {
    /// Load a catalog from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unexpected fields.
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Declare every library and bundle of this file on `builder`.
    ///
    /// Libraries are declared before bundles, each in file order. On error
    /// the builder may hold the entries declared before the failing one.
    ///
    /// # Errors
    ///
    /// Returns an error on the first malformed library or invalid name.
    pub fn apply(&self, builder: &mut DependenciesModelBuilder) -> Result<(), LoadError> {
        for (alias, spec) in &self.libraries {
            let coordinates = self.coordinates(alias, spec)?;
            builder.alias(alias, &coordinates.group, &coordinates.name, |constraint| {
                if let Some(version) = &coordinates.version {
                    version.configure(constraint);
                }
            })?;
        }
        for (bundle, aliases) in &self.bundles {
            builder.bundle(bundle, aliases)?;
        }
        Ok(())
    }

    fn coordinates(&self, alias: &str, spec: &LibrarySpec) -> Result<Coordinates, LoadError> {
        match spec {
            LibrarySpec::Notation(notation) => {
                let invalid = || LoadError::InvalidNotation {
                    alias: alias.to_string(),
                    notation: notation.clone(),
                };
                let parts: Vec<&str> = notation.split(':').collect();
                if !parts.iter().all(|part| is_coordinate_part(part)) {
                    return Err(invalid());
                }
                match parts.as_slice() {
                    [group, name] => Ok(Coordinates {
                        group: (*group).to_string(),
                        name: (*name).to_string(),
                        version: None,
                    }),
                    [group, name, version] => Ok(Coordinates {
                        group: (*group).to_string(),
                        name: (*name).to_string(),
                        version: Some(VersionDeclaration::Simple((*version).to_string())),
                    }),
                    _ => Err(invalid()),
                }
            }
            LibrarySpec::Detailed(library) => {
                let (group, name) = match (&library.module, &library.group, &library.name) {
                    (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                        return Err(LoadError::AmbiguousCoordinates {
                            alias: alias.to_string(),
                        });
                    }
                    (Some(module), None, None) => match module.split_once(':') {
                        Some((group, name))
                            if is_coordinate_part(group)
                                && is_coordinate_part(name)
                                && !name.contains(':') =>
                        {
                            (group.to_string(), name.to_string())
                        }
                        _ => {
                            return Err(LoadError::InvalidNotation {
                                alias: alias.to_string(),
                                notation: module.clone(),
                            });
                        }
                    },
                    (None, Some(group), Some(name)) => {
                        if !is_coordinate_part(group) || !is_coordinate_part(name) {
                            return Err(LoadError::InvalidNotation {
                                alias: alias.to_string(),
                                notation: format!("{group}:{name}"),
                            });
                        }
                        (group.clone(), name.clone())
                    }
                    _ => {
                        return Err(LoadError::MissingCoordinates {
                            alias: alias.to_string(),
                        });
                    }
                };
                let version = match &library.version {
                    None => None,
                    Some(LibraryVersion::Declared(declaration)) => Some(declaration.clone()),
                    Some(LibraryVersion::Reference(reference)) => Some(
                        self.versions
                            .get(&reference.name)
                            .cloned()
                            .ok_or_else(|| LoadError::UnknownVersionRef {
                                alias: alias.to_string(),
                                reference: reference.name.clone(),
                            })?,
                    ),
                };
                Ok(Coordinates {
                    group,
                    name,
                    version,
                })
            }
        }
    }
}

/// A `group`, `name` or version segment must be non-empty and unpadded.
fn is_coordinate_part(part: &str) -> bool {
    !part.is_empty() && part.trim() == part
}

/// Parse `content` and build it into a catalog snapshot.
///
/// # Errors
///
/// Returns an error if the file is malformed or the catalog is invalid.
pub fn load_catalog(content: &str) -> Result<AllDependenciesModel, LoadError> {
    let file = CatalogFile::parse(content)?;
    let mut builder = DependenciesModelBuilder::new();
    file.apply(&mut builder)?;
    Ok(builder.build()?)
}
