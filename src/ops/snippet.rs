//! Snippet generation.
//!
//! Renders the machine buckets of a registry snapshot as a plain-text
//! configuration snippet:
//!
//! ```text
//! [linux-amd64]
//! acme:foo:1.0
//!
//! [linux-aarch64-musl]
//! acme:bar:2.0
//! ```
//!
//! Sections follow the order of the snapshot; dependencies keep the order
//! the host reports them in. Empty buckets produce no section, and an
//! empty snapshot produces an empty document.

use crate::core::machine::Machine;
use crate::core::registry::Bucket;

/// Render a snapshot as snippet text.
pub fn generate(snapshot: &[(Machine, Bucket<'_>)]) -> String {
    let mut out = String::new();

    for (machine, bucket) in snapshot.iter().filter(|(_, b)| !b.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("[{}]\n", machine.identifier()));
        for dep in bucket.dependencies {
            out.push_str(dep.as_str());
            out.push('\n');
        }
    }

    out
}
