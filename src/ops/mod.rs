//! High-level operations.
//!
//! - `snippet`: render machine buckets as configuration text
//! - `output`: write or print the rendered snippet

pub mod output;
pub mod snippet;

pub use output::{print_snippet, write_snippet};
pub use snippet::generate;
