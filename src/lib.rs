//! Berth - per-machine dependency buckets for packaging
//!
//! This crate provides the core library functionality for Berth:
//! the machine taxonomy, the registry of per-machine dependency buckets,
//! and generation of the configuration snippet handed to packaging.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    dependency_set::DependencySets, machine::Machine, manifest::Manifest,
    registry::MachineRegistry, workspace::Workspace,
};

pub use util::context::GlobalContext;
