//! `berth write` command

use anyhow::Result;

use crate::cli::WriteArgs;
use berth::ops::write_snippet;
use berth::util::GlobalContext;

pub fn execute(_args: WriteArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let ws = super::load_workspace(&ctx)?;
    let config = ctx.load_config(&ws.berth_dir());
    let destination = ws.root().join(config.snippet_file());

    write_snippet(ws.registry(), &destination)?;
    eprintln!("       Wrote {}", destination.display());

    Ok(())
}
