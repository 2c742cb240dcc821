//! Cockpit - Entry Point
//!
//! Binary entry point for the metric watcher. Lives in the `cockpit` facade
//! crate next to the library it drives.

use clap::Parser;
use cockpit::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cockpit::run(cli).await
}
