//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::backends::scan::ScanOptions;
use crate::backends::search::{default_worker_count, run_search, SearchConfig};
use crate::core::file_reader::FileReadConfig;
use crate::core::model::Query;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::core::specifier::CleanOptions;

/// msgp - find the string literal in a source tree that printed a message.
#[derive(Parser, Debug)]
#[command(name = "msgp")]
#[command(
    author,
    version,
    about,
    long_about = r#"msgp extracts the string literals of C/C++, Python and JavaScript files
under DIRECTORY and ranks them against MESSAGE.

printf-style placeholders (%d, %-06d, %(name)s, ...) are removed from each
literal before scoring, so "Memory: %dM" still lines up with "Memory: 16M".
A literal earns one point per matched word character and a tenth of a point
per matched space or punctuation character, counted only for tokens that
appear in the same order as in MESSAGE.

Examples:
    msgp "Memory: 20.8G (min: 250M peak: 27G)" src
    msgp -n -C 2 --sort "connection refused: 10.0.0.1" .
    msgp --format jsonl --score 5 "failed to open config" lib
"#
)]
pub struct Cli {
    /// The message to look for, as it appeared at runtime.
    #[arg(value_name = "MESSAGE")]
    pub message: String,

    /// Root directory to search recursively.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Prefix output lines with line numbers.
    #[arg(short = 'n')]
    pub line_numbers: bool,

    /// Show N lines after the match.
    #[arg(short = 'A', value_name = "N", default_value_t = 0)]
    pub after: usize,

    /// Show N lines before the match.
    #[arg(short = 'B', value_name = "N", default_value_t = 0)]
    pub before: usize,

    /// Show N lines before and after the match.
    #[arg(
        short = 'C',
        value_name = "N",
        long_help = "Show N lines of context before and after the match.\n\n\
Fills in -A and -B when they are not given."
    )]
    pub context: Option<usize>,

    /// Force color highlighting on.
    #[arg(long, conflicts_with = "nocolor")]
    pub color: bool,

    /// Force color highlighting off.
    #[arg(long)]
    pub nocolor: bool,

    /// Minimum score for a literal to be reported.
    #[arg(
        long,
        env = "MSGP_SCORE",
        default_value_t = 0.0,
        value_name = "SCORE"
    )]
    pub score: f64,

    /// Sort results by score, highest first.
    #[arg(long)]
    pub sort: bool,

    /// Prefix each line with the file name and suppress the summary line.
    #[arg(short = 'H', long)]
    pub with_filename: bool,

    /// Enable debug logging on stderr.
    #[arg(
        long,
        long_help = "Enable debug logging on stderr.\n\n\
Overrides MSGP_LOG; without either, only warnings are logged."
    )]
    pub debug: bool,

    /// Number of worker threads (default: logical CPUs).
    #[arg(
        short = 'j',
        long,
        env = "MSGP_JOBS",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub jobs: Option<u16>,

    /// Output format (text/jsonl/json).
    #[arg(
        long,
        default_value = "text",
        value_parser = ["text", "jsonl", "json"],
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): summary line plus source context\n\
- jsonl: one JSON object per hit\n\
- json: a single JSON array"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Include hidden files/directories (dotfiles).
    #[arg(long)]
    pub hidden: bool,

    /// Disable .gitignore and other ignore rules.
    #[arg(long)]
    pub no_ignore: bool,

    /// Remove ${...} and {...} fields from every literal, not only Python f-strings.
    #[arg(long)]
    pub strip_interpolations: bool,
}

impl Cli {
    /// Whether matched text is painted
    pub fn use_color(&self) -> bool {
        if self.color {
            true
        } else if self.nocolor {
            false
        } else {
            io::stdout().is_terminal()
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            min_score: self.score,
            worker_count: self
                .jobs
                .map(usize::from)
                .unwrap_or_else(default_worker_count),
            scan: ScanOptions {
                hidden: self.hidden,
                ignore: !self.no_ignore,
            },
            clean: CleanOptions {
                strip_interpolations: self.strip_interpolations,
            },
            read: FileReadConfig::default(),
            sort_by_score: self.sort,
        }
    }

    pub fn render_config(&self, color: bool) -> RenderConfig {
        let mut after = self.after;
        let mut before = self.before;
        if let Some(context) = self.context {
            if after == 0 {
                after = context;
            }
            if before == 0 {
                before = context;
            }
        }

        RenderConfig {
            format: self.format.parse::<OutputFormat>().unwrap_or_default(),
            pretty: self.pretty,
            color,
            line_numbers: self.line_numbers,
            with_filename: self.with_filename,
            before,
            after,
            separator: after != 0 || before != 0 || self.context.is_some(),
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    debug!(?cli, "parsed arguments");

    let color = cli.use_color();
    colored::control::set_override(color);

    let search_config = cli.search_config();
    let hits = run_search(&cli.directory, &cli.message, &search_config)?;

    let mut renderer = Renderer::with_config(cli.render_config(color))
        .with_words(Query::new(cli.message.as_str()).words());

    let mut out = io::BufWriter::new(io::stdout().lock());
    renderer.render_to(&hits, &mut out)?;
    out.flush()?;
    Ok(())
}
