/// Excel worksheet reader for rowdiff.
///
/// Reads one worksheet of an `.xlsx` workbook into rows of optional cell
/// values, ready to be indexed as a diff source. The first row is returned
/// like any other; header handling belongs to the caller. The `calamine`
/// dependency is confined to this crate.
use std::io::{Read, Seek};

use calamine::{Reader, Xlsx, open_workbook_from_rs};

pub mod error;
mod sheet;

pub use error::ImportError;
pub use sheet::cell_value;

/// Rows of optional cell values, top to bottom.
pub type SheetRows = Vec<Vec<Option<String>>>;

/// Lists the worksheet names of a workbook, in workbook order.
///
/// # Errors
///
/// Returns [`ImportError::ExcelRead`] if the workbook cannot be opened.
pub fn sheet_names<R: Read + Seek>(reader: R) -> Result<Vec<String>, ImportError> {
    let workbook = open(reader)?;
    Ok(workbook.sheet_names())
}

/// Reads the worksheet named `sheet`, or the first worksheet if `None`.
///
/// # Errors
///
/// Returns [`ImportError`] if the workbook cannot be read, has no sheets, or
/// lacks the requested sheet.
pub fn read_sheet<R: Read + Seek>(reader: R, sheet: Option<&str>) -> Result<SheetRows, ImportError> {
    let mut workbook = open(reader)?;
    let available = workbook.sheet_names();

    let name = match sheet {
        Some(name) => {
            if !available.iter().any(|s| s == name) {
                return Err(ImportError::MissingSheet {
                    sheet: name.to_owned(),
                    available,
                });
            }
            name.to_owned()
        }
        None => available.first().cloned().ok_or(ImportError::EmptyWorkbook)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ImportError::ExcelRead {
            detail: format!("failed to read sheet {name:?}: {e}"),
        })?;
    let rows = sheet::range_rows(&range);
    tracing::debug!(sheet = %name, rows = rows.len(), "read worksheet");
    Ok(rows)
}

fn open<R: Read + Seek>(reader: R) -> Result<Xlsx<R>, ImportError> {
    open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| ImportError::ExcelRead {
        detail: e.to_string(),
    })
}
