//! dogana - look up customs allowances and travel-guide notes from static JSON data
//!
//! dogana provides:
//! - Scored free-text search over the customs article catalog
//! - Category browsing
//! - Structured rendering of travel-guide sections
//! - Document health checks and data linting
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

use dogana::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
