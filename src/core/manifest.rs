//! Berth.toml manifest parsing.
//!
//! The manifest names the package, declares any extra dependency sets, and
//! lists dependency coordinates per set:
//!
//! ```toml
//! [package]
//! name = "demo"
//! version = "0.1.0"
//! sets = ["docs"]
//!
//! [dependencies]
//! implementation = ["acme:core:1.0"]
//! linuxAmd64 = ["acme:foo:1.0"]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::core::dependency_set::{Coordinate, DependencyError};

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Berth.toml";

/// Errors locating or reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find Berth.toml in {} or any parent directory", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid dependency in set `{set}`")]
    InvalidDependency {
        set: String,
        #[source]
        source: DependencyError,
    },

    #[error("unknown dependency set `{name}`\nhelp: known sets are: {}", .known.join(", "))]
    UnknownSet { name: String, known: Vec<String> },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    package: RawPackage,

    #[serde(default)]
    dependencies: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPackage {
    name: String,

    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    sets: Vec<String>,
}

/// A parsed manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    name: String,
    version: Option<String>,
    sets: Vec<String>,
    dependencies: IndexMap<String, Vec<Coordinate>>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dependencies = IndexMap::new();
        for (set, coords) in raw.dependencies {
            let coords = coords
                .into_iter()
                .map(Coordinate::new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| ManifestError::InvalidDependency {
                    set: set.clone(),
                    source,
                })?;
            dependencies.insert(set, coords);
        }

        Ok(Manifest {
            name: raw.package.name,
            version: raw.package.version,
            sets: raw.package.sets,
            dependencies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Extra dependency sets declared by the package.
    pub fn sets(&self) -> &[String] {
        &self.sets
    }

    /// Dependencies keyed by set name, in file order.
    pub fn dependencies(&self) -> &IndexMap<String, Vec<Coordinate>> {
        &self.dependencies
    }
}

/// Find the manifest in `dir` or any of its ancestors.
///
/// The search checks `ceiling` itself but never goes above it. Without a
/// ceiling, or when `dir` is not below it, the search runs to the root.
pub fn find_manifest(dir: &Path, ceiling: Option<&Path>) -> Result<PathBuf, ManifestError> {
    let mut current = dir.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if Some(current.as_path()) == ceiling || !current.pop() {
            return Err(ManifestError::NotFound {
                dir: dir.to_path_buf(),
            });
        }
    }
}
