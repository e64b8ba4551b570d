//! Command implementations

pub mod print;
pub mod write;

use anyhow::Result;

use berth::core::Workspace;
use berth::util::GlobalContext;

/// Locate and load the workspace for the current directory.
pub(crate) fn load_workspace(ctx: &GlobalContext) -> Result<Workspace> {
    let host = ctx.host_machine()?;
    let manifest_path = ctx.find_manifest().map_err(|e| {
        anyhow::anyhow!(
            "{}\n\
             help: create a Berth.toml with a [package] section",
            e
        )
    })?;

    Workspace::new(&manifest_path, host)
}
