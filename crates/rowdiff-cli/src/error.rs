/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `rowdiff` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2**: the inputs could not be read, parsed, or configured.
/// - Exit code **1**: the comparison ran and found differences.
use std::fmt;
use std::path::PathBuf;

use rowdiff_core::{ConfigError, Error as CoreError};
use rowdiff_excel::ImportError;

/// All error conditions that the `rowdiff` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, otherwise the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// Delimited input is not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// Any other I/O error.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A CSV or XLSX input could not be parsed into rows.
    ParseFailed {
        /// A human-readable label for the source.
        source: String,
        /// Parser error message.
        detail: String,
    },

    /// A command-line argument is malformed.
    InvalidArgument {
        /// What was wrong with it.
        detail: String,
    },

    /// The source configuration was rejected, or the sources cannot be compared.
    Config {
        /// The library error message.
        detail: String,
    },

    // --- Exit code 1: logical outcome ---
    /// The inputs differ. The changeset has already been printed.
    DiffHasDifferences,
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::InvalidArgument { .. }
            | Self::Config { .. } => 2,

            Self::DiffHasDifferences => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { source, detail } => {
                format!("error: failed to parse {source}: {detail}")
            }
            Self::InvalidArgument { detail } => format!("error: invalid argument: {detail}"),
            Self::Config { detail } => format!("error: {detail}"),
            Self::DiffHasDifferences => "differences found".to_owned(),
        }
    }

    /// Wraps a workbook import failure for `source`.
    pub fn from_import(source: &str, err: &ImportError) -> Self {
        Self::ParseFailed {
            source: source.to_owned(),
            detail: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::Config {
            detail: err.to_string(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            detail: err.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rowdiff_core::DiffError;

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("left.csv"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/secret.csv"),
            },
            CliError::FileTooLarge {
                source: "big.csv".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::InvalidUtf8 {
                source: "bad.csv".to_owned(),
                byte_offset: 42,
            },
            CliError::StdinReadError {
                detail: "broken pipe".to_owned(),
            },
            CliError::IoError {
                source: "stdout".to_owned(),
                detail: "closed".to_owned(),
            },
            CliError::ParseFailed {
                source: "x.csv".to_owned(),
                detail: "bad record".to_owned(),
            },
            CliError::InvalidArgument {
                detail: "x".to_owned(),
            },
            CliError::Config {
                detail: "x".to_owned(),
            },
        ];
        for e in &errors {
            assert_eq!(e.exit_code(), 2, "{e}");
        }
    }

    #[test]
    fn differences_are_exit_1() {
        assert_eq!(CliError::DiffHasDifferences.exit_code(), 1);
    }

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(e.message(), "error: file not found: missing.csv");
    }

    #[test]
    fn file_too_large_message_for_stdin() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 10,
            actual: None,
        };
        assert_eq!(
            e.message(),
            "error: file too large: - exceeded limit of 10 bytes"
        );
    }

    #[test]
    fn invalid_utf8_message_contains_offset() {
        let e = CliError::InvalidUtf8 {
            source: "bad.csv".to_owned(),
            byte_offset: 7,
        };
        assert!(e.message().contains("offset 7"));
    }

    #[test]
    fn core_errors_become_config_errors() {
        let e = CliError::from(CoreError::from(ConfigError::MissingKeyFields));
        assert_eq!(e.exit_code(), 2);
        assert!(e.message().starts_with("error: "));

        let e = CliError::from(CoreError::from(DiffError::CaseSensitivityMismatch));
        assert!(matches!(e, CliError::Config { .. }));
    }

    #[test]
    fn import_errors_become_parse_failures() {
        let e = CliError::from_import("book.xlsx", &ImportError::EmptyWorkbook);
        assert!(e.message().starts_with("error: failed to parse book.xlsx: "));
    }
}
