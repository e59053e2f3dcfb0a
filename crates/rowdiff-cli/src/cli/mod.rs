//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// A single JSON object on stdout.
    Json,
}

/// Input file format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum InputFormat {
    /// Decide by file extension: `.xlsx`/`.xlsm` are workbooks, anything else CSV.
    Auto,
    /// Delimited text.
    Csv,
    /// Excel workbook.
    Xlsx,
}

/// Options describing how an input is read and indexed.
///
/// Both sides of a diff share these; the engine requires matching key
/// layouts and case sensitivity anyway.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Key field by name or zero-based index, for a flat key (repeatable).
    #[arg(long, short = 'k', value_name = "FIELD")]
    pub key_field: Vec<String>,
    /// Parent field by name or zero-based index (repeatable).
    #[arg(long, short = 'p', value_name = "FIELD", conflicts_with = "key_field")]
    pub parent_field: Vec<String>,
    /// Child field by name or zero-based index (repeatable).
    #[arg(long, short = 'c', value_name = "FIELD", conflicts_with = "key_field")]
    pub child_field: Vec<String>,
    /// Field names to use instead of reading them from the first row.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub field_names: Option<Vec<String>>,
    /// Treat the first row as a header and discard it (with --field-names).
    #[arg(long, requires = "field_names")]
    pub ignore_header: bool,
    /// Compare key and field values without regard to case.
    #[arg(long, short = 'i')]
    pub ignore_case: bool,
    /// Strip leading and trailing whitespace from every value.
    #[arg(long)]
    pub trim: bool,
    /// Keep only rows whose FIELD matches REGEX (repeatable).
    #[arg(long, value_name = "FIELD=REGEX")]
    pub include: Vec<String>,
    /// Drop rows whose FIELD matches REGEX (repeatable).
    #[arg(long, value_name = "FIELD=REGEX")]
    pub exclude: Vec<String>,
    /// Input format.
    #[arg(long = "input-format", default_value = "auto", value_enum)]
    pub input_format: InputFormat,
    /// Field delimiter for delimited text.
    #[arg(long, short = 'd', default_value = ",")]
    pub delimiter: char,
    /// Worksheet to read from a workbook (default: the first sheet).
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,
}

/// All subcommands supported by `rowdiff`.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two tables and print the changeset.
    ///
    /// Exits 0 when the inputs are equivalent and 1 when differences are found.
    Diff {
        /// Path to the left ("from") table, or `-` for stdin.
        #[arg(value_name = "LEFT")]
        left: PathOrStdin,
        /// Path to the right ("to") table (cannot be `-` if LEFT is `-`).
        #[arg(value_name = "RIGHT")]
        right: PathOrStdin,
        #[command(flatten)]
        source: SourceArgs,
        /// Exclude this field from comparison (repeatable, case-insensitive).
        #[arg(long, value_name = "FIELD")]
        ignore_field: Vec<String>,
        /// Compare only fields present in both inputs.
        #[arg(long)]
        common_fields_only: bool,
        /// Do not report added rows.
        #[arg(long)]
        ignore_adds: bool,
        /// Do not report deleted rows.
        #[arg(long)]
        ignore_deletes: bool,
        /// Do not report updated rows.
        #[arg(long)]
        ignore_updates: bool,
        /// Do not report moved rows.
        #[arg(long)]
        ignore_moves: bool,
        /// Only print the summary line, no per-row details.
        #[arg(long)]
        summary_only: bool,
    },

    /// Index a table and print its fields, keys, counts and warnings.
    Inspect {
        /// Path to a table, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Root CLI struct for `rowdiff`.
#[derive(Parser, Debug)]
#[command(
    name = "rowdiff",
    version,
    about = "Compare hierarchical tabular datasets",
    long_about = None,
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Output format.
    #[arg(long, short = 'f', global = true, default_value = "human", value_enum)]
    pub format: OutputFormat,

    /// Suppress everything but errors on stderr.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log progress to stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Maximum input size in bytes (default: 256 MB).
    #[arg(
        long,
        global = true,
        env = "ROWDIFF_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color output.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests;
