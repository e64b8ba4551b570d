//! Machine registry - one dependency bucket per machine.
//!
//! The registry owns the host's dependency sets together with the mapping
//! from [`Machine`] to the set acting as that machine's bucket. Buckets are
//! created on first use and reused afterwards. The bucket of the host
//! machine is merged into the project's default set when it is created.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::dependency_set::{
    Coordinate, DependencyError, DependencyHost, DependencySets, SetId,
};
use crate::core::machine::Machine;

/// Handle to a machine's bucket in the host.
pub type BucketId = SetId;

/// Error while registering or reading machine buckets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(
        "cannot create bucket `{name}` for machine `{machine}`: \
         a dependency set with that name already exists"
    )]
    Conflict { name: String, machine: Machine },

    #[error(transparent)]
    Host(#[from] DependencyError),
}

/// Read-only view of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub id: BucketId,
    pub name: &'a str,
    pub dependencies: &'a [Coordinate],
}

impl Bucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Mapping from machine to bucket, plus the host sets the buckets live in.
///
/// Mutation goes through `&mut self`, so creation is exclusive for as
/// long as the registry has a single owner.
#[derive(Debug)]
pub struct MachineRegistry<H = DependencySets> {
    host: Machine,
    deps: H,
    buckets: BTreeMap<Machine, BucketId>,
}

impl<H: DependencyHost> MachineRegistry<H> {
    /// Create an empty registry for a process running on `host`, taking
    /// over the host's dependency sets.
    pub fn new(host: Machine, deps: H) -> Self {
        MachineRegistry {
            host,
            deps,
            buckets: BTreeMap::new(),
        }
    }

    /// The host dependency sets.
    pub fn deps(&self) -> &H {
        &self.deps
    }

    /// Create buckets for every supported machine.
    pub fn register_all_machines(&mut self) -> Result<(), RegistryError> {
        for machine in Machine::all() {
            self.ensure_bucket(machine)?;
        }
        Ok(())
    }

    /// Get the bucket for `machine`, creating it if needed.
    ///
    /// A new bucket for the host machine is merged into the default set:
    /// the default set extends it, so anything added to the bucket later
    /// is visible there too. Repeated calls return the same bucket and
    /// never merge twice.
    pub fn ensure_bucket(&mut self, machine: Machine) -> Result<BucketId, RegistryError> {
        if let Some(&id) = self.buckets.get(&machine) {
            return Ok(id);
        }

        let name = machine.bucket_name();
        let id = self.deps.create_set(&name).map_err(|e| match e {
            DependencyError::Conflict { name } => RegistryError::Conflict { name, machine },
            other => RegistryError::Host(other),
        })?;
        tracing::debug!("created bucket `{}` for {}", name, machine);

        if machine == self.host {
            let default = self.deps.default_set();
            self.deps.extend(default, id)?;
            tracing::debug!(
                "`{}` extends host bucket `{}`",
                self.deps.set_name(default)?,
                name
            );
        }

        self.buckets.insert(machine, id);
        Ok(id)
    }

    /// Add a dependency to one of the host's sets.
    pub fn add(&mut self, set: SetId, coordinate: Coordinate) -> Result<(), RegistryError> {
        self.deps.add(set, coordinate)?;
        Ok(())
    }

    /// The bucket for `machine`, if it has been created.
    pub fn bucket(&self, machine: Machine) -> Option<BucketId> {
        self.buckets.get(&machine).copied()
    }

    /// Number of registered machines.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Every registered machine with its bucket, in taxonomy order.
    pub fn snapshot(&self) -> Result<Vec<(Machine, Bucket<'_>)>, RegistryError> {
        let mut out = Vec::with_capacity(self.buckets.len());
        for (&machine, &id) in &self.buckets {
            let bucket = Bucket {
                id,
                name: self.deps.set_name(id)?,
                dependencies: self.deps.declared(id)?,
            };
            out.push((machine, bucket));
        }
        Ok(out)
    }
}
