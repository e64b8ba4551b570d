//! Workspace - a loaded project with its dependency sets and machine buckets.
//!
//! Loading a workspace follows the same order a build host would: the
//! reserved and user-declared sets are created, every machine bucket is
//! registered, and then the manifest's dependencies are attached to their
//! sets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::dependency_set::{DependencyHost, DependencySets};
use crate::core::machine::Machine;
use crate::core::manifest::{Manifest, ManifestError};
use crate::core::registry::MachineRegistry;

/// A project ready for snippet generation.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    manifest: Manifest,
    registry: MachineRegistry,
}

impl Workspace {
    /// Load the workspace whose manifest is at `manifest_path`.
    pub fn new(manifest_path: &Path, host: Machine) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let root = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        Self::from_manifest(manifest, root, host)
    }

    /// Build a workspace from an already parsed manifest.
    pub fn from_manifest(manifest: Manifest, root: PathBuf, host: Machine) -> Result<Self> {
        let mut deps = DependencySets::new();
        for name in manifest.sets() {
            deps.create_set(name)
                .with_context(|| format!("failed to declare dependency set `{}`", name))?;
        }

        let mut registry = MachineRegistry::new(host, deps);
        registry
            .register_all_machines()
            .context("failed to register machine buckets")?;

        // Entries are applied in file order, so the first bad one is reported.
        for (set_name, coords) in manifest.dependencies() {
            let set = registry
                .deps()
                .find(set_name)
                .ok_or_else(|| ManifestError::UnknownSet {
                    name: set_name.clone(),
                    known: registry.deps().names().map(str::to_string).collect(),
                })?;
            for coord in coords {
                registry
                    .add(set, coord.clone())
                    .with_context(|| format!("failed to add `{}` to `{}`", coord, set_name))?;
            }
        }

        tracing::debug!(
            "loaded `{}` {} with {} machine buckets (host: {})",
            manifest.name(),
            manifest.version().unwrap_or("(unversioned)"),
            registry.len(),
            host
        );

        Ok(Workspace {
            root,
            manifest,
            registry,
        })
    }

    /// The project directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn registry(&self) -> &MachineRegistry {
        &self.registry
    }

    /// The project's `.berth` directory.
    pub fn berth_dir(&self) -> PathBuf {
        self.root.join(".berth")
    }
}
