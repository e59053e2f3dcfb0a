/// Input reading: size-capped file and stdin reads, then CSV or XLSX parsing.
///
/// `rowdiff-core` never touches the filesystem; all reading happens here.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - Delimited text must be UTF-8; workbooks are read as raw bytes.
/// - All failures are converted to [`CliError`] variants with exit code 2.
use std::io::{Cursor, Read as _};
use std::path::Path;

use rowdiff_core::Cells;

use crate::error::CliError;
use crate::{InputFormat, PathOrStdin};

/// How a single input should be parsed.
#[derive(Debug, Clone)]
pub struct ReadOptions<'a> {
    /// Explicit format, or [`InputFormat::Auto`] to go by file extension.
    pub format: InputFormat,
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Worksheet to read from a workbook; the first sheet if `None`.
    pub sheet: Option<&'a str>,
    /// Size limit in bytes.
    pub max_size: u64,
}

/// Reads `source` and parses it into raw rows, header row included.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) if the input cannot be read, exceeds
/// the size limit, or does not parse.
pub fn read_rows(source: &PathOrStdin, options: &ReadOptions<'_>) -> Result<Vec<Cells>, CliError> {
    let bytes = read_bytes(source, options.max_size)?;
    let label = label(source);
    let rows = match resolve_format(source, options.format) {
        InputFormat::Xlsx => rowdiff_excel::read_sheet(Cursor::new(bytes), options.sheet)
            .map_err(|e| CliError::from_import(&label, &e))?,
        InputFormat::Csv | InputFormat::Auto => {
            let text = bytes_to_str(&bytes, &label)?;
            parse_delimited(text, options.delimiter, &label)?
        }
    };
    tracing::info!(source = %label, rows = rows.len(), "read input");
    Ok(rows)
}

/// Reads the entire contents of `source`, enforcing `max_size`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file,
/// an input larger than `max_size`, or a stdin read failure.
pub fn read_bytes(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Display label of an input: the path, or `-` for stdin.
pub fn label(source: &PathOrStdin) -> String {
    match source {
        PathOrStdin::Path(path) => path.display().to_string(),
        PathOrStdin::Stdin => "-".to_owned(),
    }
}

/// Picks a concrete format. `.xlsx` and `.xlsm` paths are workbooks;
/// everything else, stdin included, is delimited text.
pub fn resolve_format(source: &PathOrStdin, format: InputFormat) -> InputFormat {
    match format {
        InputFormat::Csv | InputFormat::Xlsx => format,
        InputFormat::Auto => {
            let is_workbook = match source {
                PathOrStdin::Path(path) => path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm")
                    }),
                PathOrStdin::Stdin => false,
            };
            if is_workbook {
                InputFormat::Xlsx
            } else {
                InputFormat::Csv
            }
        }
    }
}

/// Parses delimited text into rows. Records may differ in length; every
/// field present in a record becomes `Some`, even when empty.
///
/// # Errors
///
/// Returns [`CliError::ParseFailed`] for malformed records.
pub fn parse_delimited(text: &str, delimiter: u8, label: &str) -> Result<Vec<Cells>, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CliError::ParseFailed {
            source: label.to_owned(),
            detail: e.to_string(),
        })?;
        rows.push(record.iter().map(|field| Some(field.to_owned())).collect());
    }
    Ok(rows)
}

fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Maps a `std::io::Error` from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Reads stdin, capped at `max_size` bytes. Reading exactly `max_size`
/// bytes triggers a one-byte probe to tell "at the limit" from "over it".
fn read_stdin(max_size: u64) -> Result<Vec<u8>, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();
    let mut buf: Vec<u8> = Vec::new();

    handle
        .by_ref()
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }
    Ok(buf)
}

fn bytes_to_str<'b>(bytes: &'b [u8], source_label: &str) -> Result<&'b str, CliError> {
    std::str::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source_label.to_owned(),
        byte_offset: e.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    fn csv_options() -> ReadOptions<'static> {
        ReadOptions {
            format: InputFormat::Auto,
            delimiter: b',',
            sheet: None,
            max_size: 1024,
        }
    }

    fn temp_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        f.write_all(content).expect("write");
        f
    }

    #[test]
    fn parses_csv_rows() {
        let f = temp_file(".csv", b"Parent,Child\nA,A1\nB,\"B,1\"\n");
        let rows = read_rows(&PathOrStdin::Path(f.path().to_path_buf()), &csv_options())
            .expect("rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![Some("B".to_owned()), Some("B,1".to_owned())]);
    }

    #[test]
    fn ragged_records_are_accepted() {
        let rows = parse_delimited("a,b,c\n1\n1,2,3,4\n", b',', "x").expect("rows");
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn empty_fields_are_present() {
        let rows = parse_delimited("a,b\n1,\n", b',', "x").expect("rows");
        assert_eq!(rows[1], vec![Some("1".to_owned()), Some(String::new())]);
    }

    #[test]
    fn custom_delimiter() {
        let rows = parse_delimited("a;b\n1;2\n", b';', "x").expect("rows");
        assert_eq!(rows[1], vec![Some("1".to_owned()), Some("2".to_owned())]);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let path = PathBuf::from("/nonexistent/left.csv");
        match read_bytes(&PathOrStdin::Path(path), 1024) {
            Err(CliError::FileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/left.csv"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn oversized_file_is_rejected() {
        let f = temp_file(".csv", b"0123456789");
        match read_bytes(&PathOrStdin::Path(f.path().to_path_buf()), 5) {
            Err(CliError::FileTooLarge { limit, actual, .. }) => {
                assert_eq!(limit, 5);
                assert_eq!(actual, Some(10));
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let f = temp_file(".csv", b"ab\xffcd");
        match read_rows(&PathOrStdin::Path(f.path().to_path_buf()), &csv_options()) {
            Err(CliError::InvalidUtf8 { byte_offset, .. }) => assert_eq!(byte_offset, 2),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[test]
    fn format_follows_extension() {
        let xlsx = PathOrStdin::Path(PathBuf::from("data/Book1.XLSX"));
        let csv = PathOrStdin::Path(PathBuf::from("data/book.csv"));
        assert!(matches!(
            resolve_format(&xlsx, InputFormat::Auto),
            InputFormat::Xlsx
        ));
        assert!(matches!(
            resolve_format(&csv, InputFormat::Auto),
            InputFormat::Csv
        ));
        assert!(matches!(
            resolve_format(&PathOrStdin::Stdin, InputFormat::Auto),
            InputFormat::Csv
        ));
        assert!(matches!(
            resolve_format(&csv, InputFormat::Xlsx),
            InputFormat::Xlsx
        ));
    }

    #[test]
    fn non_workbook_xlsx_is_parse_failure() {
        let f = temp_file(".xlsx", b"Parent,Child\n");
        match read_rows(&PathOrStdin::Path(f.path().to_path_buf()), &csv_options()) {
            Err(CliError::ParseFailed { .. }) => {}
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }
}
