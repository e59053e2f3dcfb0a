//! Implementation of `rowdiff diff <left> <right>`.
//!
//! Indexes both tables with the same source configuration, compares them,
//! and writes the changeset to stdout.
//!
//! Exit codes:
//! - 0 = the tables are equivalent
//! - 1 = differences found
//! - 2 = an input could not be read, parsed or configured
use rowdiff_core::{Cells, Changeset, ChangesetOptions, Diff, DiffSummary, SourceConfig};
use serde::Serialize;

use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_diff_human, write_summary_human, write_warning_human};

/// Rows of both inputs, header rows included.
pub struct DiffInputs {
    /// Left ("from") rows.
    pub left: Vec<Cells>,
    /// Right ("to") rows.
    pub right: Vec<Cells>,
}

/// Runs the `diff` command.
///
/// Returns `Ok(())` when the inputs are equivalent (exit 0).
///
/// # Errors
///
/// - [`CliError::Config`]: either side cannot be indexed, or the sides
///   cannot be compared.
/// - [`CliError::DiffHasDifferences`]: the changeset is non-empty.
/// - [`CliError::IoError`]: writing to stdout failed.
pub fn run(
    inputs: DiffInputs,
    config: &SourceConfig,
    options: &ChangesetOptions,
    summary_only: bool,
    format: OutputFormat,
    formatter: &FormatterConfig,
) -> Result<(), CliError> {
    let changeset = Changeset::from_rows(inputs.left, inputs.right, config, options)?;
    let summary = changeset.summary();
    tracing::info!(
        adds = summary.adds,
        deletes = summary.deletes,
        updates = summary.updates,
        moves = summary.moves,
        "compared inputs"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => write_human(&mut out, &changeset, summary_only, formatter),
        OutputFormat::Json => write_json(&mut out, &changeset, summary_only),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if changeset.is_empty() {
        Ok(())
    } else {
        Err(CliError::DiffHasDifferences)
    }
}

fn write_human<W: std::io::Write>(
    w: &mut W,
    changeset: &Changeset,
    summary_only: bool,
    formatter: &FormatterConfig,
) -> std::io::Result<()> {
    if !summary_only {
        for (key, diff) in changeset.diffs() {
            write_diff_human(w, key, diff, formatter)?;
        }
        for warning in changeset.warnings() {
            write_warning_human(w, warning, formatter)?;
        }
    }
    write_summary_human(w, &changeset.summary(), formatter)
}

#[derive(Serialize)]
struct KeyedDiff<'a> {
    key: String,
    #[serde(flatten)]
    diff: &'a Diff,
}

#[derive(Serialize)]
struct DiffReport<'a> {
    summary: DiffSummary,
    key_fields: &'a [String],
    diff_fields: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    diffs: Option<Vec<KeyedDiff<'a>>>,
    warnings: Vec<&'a str>,
}

/// Writes the changeset as one JSON object.
fn write_json<W: std::io::Write>(
    w: &mut W,
    changeset: &Changeset,
    summary_only: bool,
) -> std::io::Result<()> {
    let diffs = (!summary_only).then(|| {
        changeset
            .diffs()
            .iter()
            .map(|(key, diff)| KeyedDiff {
                key: key.to_string(),
                diff,
            })
            .collect()
    });
    let report = DiffReport {
        summary: changeset.summary(),
        key_fields: changeset.key_fields(),
        diff_fields: changeset.diff_fields(),
        diffs,
        warnings: changeset.warnings(),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)
}
