//! Core data structures for Berth.
//!
//! This module contains the foundational types:
//! - The machine taxonomy
//! - Host dependency sets
//! - The machine registry mapping machines to buckets
//! - Manifests and workspaces

pub mod dependency_set;
pub mod machine;
pub mod manifest;
pub mod registry;
pub mod workspace;

pub use dependency_set::{Coordinate, DependencyError, DependencyHost, DependencySets, SetId};
pub use machine::{CLibrary, Cpu, Machine, Os, UnsupportedMachine};
pub use manifest::{find_manifest, Manifest, ManifestError, MANIFEST_NAME};
pub use registry::{Bucket, BucketId, MachineRegistry, RegistryError};
pub use workspace::Workspace;
