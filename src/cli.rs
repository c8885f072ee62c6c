//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::catalog::api::{run_browse, run_categories, run_search};
use crate::checks::doctor::run_doctor;
use crate::checks::lint::run_lint;
use crate::core::logging::init_tracing;
use crate::core::paths::DataPaths;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::util::HashAlgorithm;
use crate::guide::api::run_guide;
use crate::guide::model::SectionKey;

/// dogana - customs allowances and travel-guide notes for Cuba, from static JSON data.
#[derive(Parser, Debug)]
#[command(name = "dogana")]
#[command(
    author,
    version,
    about,
    long_about = r#"dogana looks up what a traveller may bring into Cuba and renders the
companion travel guide, reading two static JSON documents from a data directory.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: plain text

Examples:
    dogana search laptop
    dogana search telefono cellulare --limit 5
    dogana categories
    dogana browse 2
    dogana guide elettricita emergenze --format md
    dogana doctor --hash sha1
"#
)]
pub struct Cli {
    /// Directory holding the data documents.
    #[arg(
        long,
        global = true,
        env = "DOGANA_DATA_DIR",
        default_value = ".",
        value_name = "DIR",
        long_help = "Directory holding the data documents (defaults to the current directory).\n\n\
The catalog is read from aduana_cuba_db.json and the guide from\n\
guida_viaggiatore_cuba.json inside this directory, unless overridden."
    )]
    pub data_dir: PathBuf,

    /// Catalog document (relative to the data directory unless absolute).
    #[arg(long, global = true, env = "DOGANA_CATALOG", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Guide document (relative to the data directory unless absolute).
    #[arg(long, global = true, env = "DOGANA_GUIDE", value_name = "FILE")]
    pub guide: Option<PathBuf>,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (plain text)\n\n\
Tip: Prefer md or raw when reading results in a terminal."
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Reduce non-essential output. Results are still printed to stdout;\n\
only diagnostics and summaries on stderr are suppressed."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the customs catalog.
    #[command(
        long_about = r#"Case-insensitive substring search over every article of the catalog.

Each match is scored: primary name +10, each matching synonym +8,
secondary name +5, category name +3. Results are ordered by score;
equal scores keep catalog order.

An empty query lists the categories instead.

Examples:
    dogana search laptop
    dogana search "forno a microonde"
    dogana search tel --limit 3
"#
    )]
    Search {
        /// Query words (joined with a space).
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,

        /// Maximum number of results.
        #[arg(
            long,
            value_name = "N",
            long_help = "Keep only the first N results after ranking (N >= 1).\n\n\
When results are dropped, the last kept item is marked as truncated."
        )]
        limit: Option<NonZeroUsize>,
    },

    /// List catalog categories.
    #[command(
        long_about = "List the catalog categories in declaration order, with their icon,\n\
position and article count. The position can be passed to `browse`."
    )]
    Categories,

    /// Browse one category.
    #[command(
        long_about = r#"Show the articles of one category.

CATEGORY is a 1-based position, an exact name or a name prefix
(case-insensitive). Browsing searches for the first word of the
category name, so results are scored like any other search.

Examples:
    dogana browse 1
    dogana browse elettronica
    dogana browse med
"#
    )]
    Browse {
        /// Category position, name or name prefix.
        #[arg(value_name = "CATEGORY")]
        category: String,

        /// Maximum number of results.
        #[arg(long, value_name = "N")]
        limit: Option<NonZeroUsize>,
    },

    /// Render the travel guide.
    #[command(
        long_about = r#"Render the travel guide section by section.

With no SECTION every section is rendered in document order; sections
with an unknown key show a placeholder. Otherwise only the named sections
are rendered. SECTION accepts the document key or an English alias:

    elettricita       electricity
    internet_sim      internet
    moneta_pagamenti  currency
    trasporti         transport
    ambasciata        embassy
    emergenze         emergencies
    salute            health
    consigli_pratici  advice

Examples:
    dogana guide --format md
    dogana guide health emergenze
"#
    )]
    Guide {
        /// Sections to render.
        #[arg(value_name = "SECTION", num_args = 0..)]
        sections: Vec<SectionKey>,
    },

    /// Check the data documents.
    #[command(
        long_about = "Check that each data document can be read and parsed, and report its\n\
size, modification time, content hash and entry counts.\n\n\
Examples:\n\
  dogana doctor\n\
  dogana doctor --hash sha1\n"
    )]
    Doctor {
        /// Hash algorithm for document fingerprints (xxh3/sha1).
        #[arg(long, default_value = "xxh3", value_name = "ALGO")]
        hash: HashAlgorithm,
    },

    /// Lint the data documents.
    #[command(
        long_about = "Run integrity checks over the catalog and the guide: duplicate or empty\n\
categories, duplicate articles, missing or unrecognized quantity limits, blank\n\
synonyms, unknown or duplicate section keys, malformed embassy email and website.\n\n\
Each finding is emitted as an issue with a severity and a location."
    )]
    Lint,
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let config = RenderConfig::with_pretty(format, cli.pretty);
    let paths = DataPaths::resolve(&cli.data_dir, cli.catalog.as_deref(), cli.guide.as_deref());

    tracing::debug!(
        catalog = %paths.catalog.display(),
        guide = %paths.guide.display(),
        "resolved data paths"
    );

    match cli.command {
        Commands::Search { query, limit } => run_search(&paths, &query.join(" "), limit, config),
        Commands::Categories => run_categories(&paths, config),
        Commands::Browse { category, limit } => run_browse(&paths, &category, limit, config),
        Commands::Guide { sections } => run_guide(&paths, &sections, config),
        Commands::Doctor { hash } => run_doctor(&paths, hash, cli.quiet, config),
        Commands::Lint => run_lint(&paths, config),
    }
}
