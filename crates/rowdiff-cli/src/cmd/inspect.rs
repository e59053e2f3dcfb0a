//! Implementation of `rowdiff inspect <file>`.
//!
//! Indexes one table and prints what the diff engine would see: field
//! names, key layout, row counts and indexing warnings.
//!
//! Exit codes: 0 = success, 2 = the input could not be read or indexed.
use rowdiff_core::{Cells, Source, SourceConfig};
use serde::Serialize;

use crate::OutputFormat;
use crate::error::CliError;

/// Statistics gathered from an indexed [`Source`].
#[derive(Debug, Serialize)]
pub struct InspectStats {
    /// All field names, in column order.
    pub field_names: Vec<String>,
    /// Parent field names; empty for flat keys.
    pub parent_fields: Vec<String>,
    /// Child field names (every key field for flat keys).
    pub child_fields: Vec<String>,
    pub case_sensitive: bool,
    /// Rows indexed.
    pub lines: usize,
    /// Rows rejected by include/exclude filters.
    pub skipped: usize,
    /// Rows whose key collided with an earlier row.
    pub duplicates: usize,
    /// Distinct parent keys.
    pub parents: usize,
    pub warnings: Vec<String>,
}

impl InspectStats {
    /// Computes statistics from an indexed [`Source`].
    pub fn from_source(source: &Source) -> Self {
        Self {
            field_names: source.field_names().to_vec(),
            parent_fields: source.parent_field_names(),
            child_fields: source.child_field_names(),
            case_sensitive: source.case_sensitive(),
            lines: source.line_count(),
            skipped: source.skip_count(),
            duplicates: source.dup_count(),
            parents: source.index().len(),
            warnings: source.warnings().to_vec(),
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the rows cannot be indexed with `config`,
/// or [`CliError::IoError`] if writing to stdout fails.
pub fn run(rows: Vec<Cells>, config: &SourceConfig, format: OutputFormat) -> Result<(), CliError> {
    let source = Source::build(rows, config)?;
    let stats = InspectStats::from_source(&source);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "fields:         {}", stats.field_names.join(", "))?;
    if !stats.parent_fields.is_empty() {
        writeln!(w, "parent fields:  {}", stats.parent_fields.join(", "))?;
    }
    writeln!(w, "key fields:     {}", stats.child_fields.join(", "))?;
    writeln!(w, "case sensitive: {}", stats.case_sensitive)?;
    writeln!(w, "lines:          {}", stats.lines)?;
    writeln!(w, "parents:        {}", stats.parents)?;
    writeln!(w, "skipped:        {}", stats.skipped)?;
    writeln!(w, "duplicates:     {}", stats.duplicates)?;
    for warning in &stats.warnings {
        writeln!(w, "  ! {warning}")?;
    }
    Ok(())
}

fn print_json<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, stats)?;
    writeln!(w)
}
