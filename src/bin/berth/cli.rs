//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Berth - per-machine dependency snippets for packaging
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the machine dependency snippet into the project directory
    Write(WriteArgs),

    /// Print the machine dependency snippet
    Print(PrintArgs),
}

#[derive(Args)]
pub struct WriteArgs {}

#[derive(Args)]
pub struct PrintArgs {}
