//! contentindex CLI: turns CMS content snapshots into search-index records.
//!
//! Reads an already-fetched item universe, converts every page-like item
//! into a flat search record, and writes the records as JSON for upload.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
