//! `berth print` command

use anyhow::Result;

use crate::cli::PrintArgs;
use berth::ops::print_snippet;
use berth::util::GlobalContext;

pub fn execute(_args: PrintArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let ws = super::load_workspace(&ctx)?;

    let stdout = std::io::stdout();
    print_snippet(ws.registry(), &mut stdout.lock())
}
