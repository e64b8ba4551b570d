//! Named dependency sets owned by the host build.
//!
//! The host keeps a collection of named sets of dependency coordinates.
//! One of them is the project's default set; others can be made to extend
//! it so their dependencies become visible through the default set.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Name of the project's default dependency set.
pub const DEFAULT_SET: &str = "implementation";

/// Sets every project starts with.
pub const RESERVED_SETS: &[&str] = &[
    DEFAULT_SET,
    "api",
    "compileOnly",
    "runtimeOnly",
    "testImplementation",
];

/// Errors raised by the host dependency system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("dependency set `{name}` already exists")]
    Conflict { name: String },

    #[error("invalid dependency coordinate `{coordinate}`: {reason}")]
    InvalidCoordinate { coordinate: String, reason: String },

    #[error("dependency set {set:?} does not belong to this project")]
    UnknownSet { set: SetId },
}

/// A dependency coordinate, typically `group:artifact:version`.
///
/// Coordinates are written one per line into snippets, so they may not be
/// empty or contain whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate(String);

impl Coordinate {
    pub fn new(s: impl Into<String>) -> Result<Self, DependencyError> {
        let s = s.into();
        let reason = if s.is_empty() {
            Some("coordinate is empty")
        } else if s.chars().any(char::is_whitespace) {
            Some("coordinate contains whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DependencyError::InvalidCoordinate {
                coordinate: s,
                reason: reason.to_string(),
            }),
            None => Ok(Coordinate(s)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a dependency set inside a [`DependencyHost`].
///
/// Handles remember which `DependencySets` issued them; passing one to a
/// different collection is reported as [`DependencyError::UnknownSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId {
    owner: u64,
    index: usize,
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// The host's dependency system.
///
/// Sets are identified by unique names. Creating a set never replaces an
/// existing one.
pub trait DependencyHost {
    /// Create a new, empty set. Fails if the name is already taken.
    fn create_set(&mut self, name: &str) -> Result<SetId, DependencyError>;

    /// Look up a set by name.
    fn find(&self, name: &str) -> Option<SetId>;

    /// The project's default set.
    fn default_set(&self) -> SetId;

    /// Make `child` extend `parent`: every dependency of `parent`, now or
    /// later, is visible through `child`.
    fn extend(&mut self, child: SetId, parent: SetId) -> Result<(), DependencyError>;

    /// Add a dependency to a set. Adding one already present is a no-op.
    fn add(&mut self, set: SetId, coordinate: Coordinate) -> Result<(), DependencyError>;

    fn set_name(&self, set: SetId) -> Result<&str, DependencyError>;

    /// Dependencies declared directly on `set`, in insertion order.
    fn declared(&self, set: SetId) -> Result<&[Coordinate], DependencyError>;

    /// Dependencies of `set` including those of every set it extends.
    fn resolved(&self, set: SetId) -> Result<Vec<Coordinate>, DependencyError>;
}

#[derive(Debug)]
struct SetEntry {
    name: String,
    dependencies: Vec<Coordinate>,
    extends: Vec<SetId>,
}

impl SetEntry {
    fn new(name: &str) -> Self {
        SetEntry {
            name: name.to_string(),
            dependencies: Vec::new(),
            extends: Vec::new(),
        }
    }
}

/// In-memory dependency sets for a single project.
#[derive(Debug)]
pub struct DependencySets {
    owner: u64,
    sets: Vec<SetEntry>,
}

impl DependencySets {
    /// Create the collection with the reserved sets.
    pub fn new() -> Self {
        DependencySets {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            sets: RESERVED_SETS.iter().map(|name| SetEntry::new(name)).collect(),
        }
    }

    /// Names of all sets, in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    fn id(&self, index: usize) -> SetId {
        SetId {
            owner: self.owner,
            index,
        }
    }

    fn entry(&self, set: SetId) -> Result<&SetEntry, DependencyError> {
        if set.owner != self.owner {
            return Err(DependencyError::UnknownSet { set });
        }
        self.sets
            .get(set.index)
            .ok_or(DependencyError::UnknownSet { set })
    }

    fn entry_mut(&mut self, set: SetId) -> Result<&mut SetEntry, DependencyError> {
        if set.owner != self.owner {
            return Err(DependencyError::UnknownSet { set });
        }
        self.sets
            .get_mut(set.index)
            .ok_or(DependencyError::UnknownSet { set })
    }

    fn collect_resolved(
        &self,
        set: SetId,
        visited: &mut HashSet<SetId>,
        seen: &mut HashSet<Coordinate>,
        out: &mut Vec<Coordinate>,
    ) -> Result<(), DependencyError> {
        if !visited.insert(set) {
            return Ok(());
        }
        let entry = self.entry(set)?;
        for coordinate in &entry.dependencies {
            if seen.insert(coordinate.clone()) {
                out.push(coordinate.clone());
            }
        }
        for &parent in &entry.extends {
            self.collect_resolved(parent, visited, seen, out)?;
        }
        Ok(())
    }
}

impl Default for DependencySets {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyHost for DependencySets {
    fn create_set(&mut self, name: &str) -> Result<SetId, DependencyError> {
        if self.find(name).is_some() {
            return Err(DependencyError::Conflict {
                name: name.to_string(),
            });
        }

        let id = self.id(self.sets.len());
        self.sets.push(SetEntry::new(name));
        Ok(id)
    }

    fn find(&self, name: &str) -> Option<SetId> {
        self.sets
            .iter()
            .position(|s| s.name == name)
            .map(|index| self.id(index))
    }

    fn default_set(&self) -> SetId {
        self.id(0)
    }

    fn extend(&mut self, child: SetId, parent: SetId) -> Result<(), DependencyError> {
        self.entry(parent)?;
        let extends = &mut self.entry_mut(child)?.extends;
        if !extends.contains(&parent) {
            extends.push(parent);
        }
        Ok(())
    }

    fn add(&mut self, set: SetId, coordinate: Coordinate) -> Result<(), DependencyError> {
        let dependencies = &mut self.entry_mut(set)?.dependencies;
        if !dependencies.contains(&coordinate) {
            dependencies.push(coordinate);
        }
        Ok(())
    }

    fn set_name(&self, set: SetId) -> Result<&str, DependencyError> {
        self.entry(set).map(|e| e.name.as_str())
    }

    fn declared(&self, set: SetId) -> Result<&[Coordinate], DependencyError> {
        self.entry(set).map(|e| e.dependencies.as_slice())
    }

    fn resolved(&self, set: SetId) -> Result<Vec<Coordinate>, DependencyError> {
        let mut out = Vec::new();
        self.collect_resolved(set, &mut HashSet::new(), &mut HashSet::new(), &mut out)?;
        Ok(out)
    }
}
