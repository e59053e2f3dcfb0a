/// Human-readable rendering of changesets.
///
/// One line per diff, prefixed by its action (`+` add, `-` delete,
/// `~` update, `>` move) and color-coded when colors are enabled. Colors are
/// disabled when `--no-color` is set, the `NO_COLOR` environment variable is
/// present (per <https://no-color.org>), or stdout is not a TTY.
use std::io::{IsTerminal as _, Write};

use rowdiff_core::{Diff, DiffSummary, DiffType, FieldValue, RowKey, SiblingPosition};

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

/// Rendering options derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress warnings and the summary line.
    pub quiet: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
        }
    }
}

fn marker(diff_type: DiffType) -> (&'static str, &'static str) {
    match diff_type {
        DiffType::Add => ("+", ANSI_GREEN),
        DiffType::Delete => ("-", ANSI_RED),
        DiffType::Update => ("~", ANSI_YELLOW),
        DiffType::Move => (">", ANSI_CYAN),
    }
}

/// Writes one diff line.
///
/// ```text
/// + A~A5  row 4  Parent=A, Child=A5, Description=Account 5
/// ~ A~A2  row 2  Description: "Account 2" -> "Account2"
/// > B~A6  row 5  position 5 -> 1
/// ```
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diff_human<W: Write>(
    writer: &mut W,
    key: &RowKey,
    diff: &Diff,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let (tag, color) = marker(diff.diff_type);
    if config.colors {
        write!(writer, "{color}{tag}{ANSI_RESET} {key}  row {}", diff.row)?;
    } else {
        write!(writer, "{tag} {key}  row {}", diff.row)?;
    }

    match diff.diff_type {
        DiffType::Add | DiffType::Delete => {
            let values: Vec<String> = diff
                .fields
                .iter()
                .map(|(name, value)| format!("{name}={}", value.current().unwrap_or("")))
                .collect();
            write!(writer, "  {}", values.join(", "))?;
        }
        DiffType::Update => {
            let changes: Vec<String> = diff
                .changes()
                .map(|(name, value)| format_change(name, value))
                .collect();
            write!(writer, "  {}", changes.join("; "))?;
            if let SiblingPosition::Pair(old, new) = diff.sibling_position {
                write!(writer, "  (position {old} -> {new})")?;
            }
        }
        DiffType::Move => {
            write!(writer, "  position {}", diff.sibling_position)?;
        }
    }
    writeln!(writer)
}

fn format_change(name: &str, value: &FieldValue) -> String {
    format!(
        "{name}: {} -> {}",
        quoted(value.previous()),
        quoted(value.current())
    )
}

fn quoted(value: Option<&str>) -> String {
    value.map_or_else(|| "(none)".to_owned(), |v| format!("{v:?}"))
}

/// Writes a warning line. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_warning_human<W: Write>(
    writer: &mut W,
    warning: &str,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    if config.colors {
        writeln!(writer, "{ANSI_YELLOW}!{ANSI_RESET} {warning}")
    } else {
        writeln!(writer, "! {warning}")
    }
}

/// Writes the summary line, e.g. `3 added, 2 deleted, 1 updated, 0 moved, 1 warning`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    summary: &DiffSummary,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        "{} added, {} deleted, {} updated, {} moved, {} {}",
        summary.adds,
        summary.deletes,
        summary.updates,
        summary.moves,
        summary.warnings,
        pluralize(summary.warnings, "warning", "warnings"),
    )
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
