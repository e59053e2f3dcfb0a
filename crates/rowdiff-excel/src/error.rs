//! Errors produced while reading a workbook.

/// All error conditions that can occur while reading an Excel worksheet.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The requested sheet is not in the workbook.
    #[error("missing sheet {sheet:?} (available: {})", available.join(", "))]
    MissingSheet {
        /// Name of the requested sheet.
        sheet: String,
        /// Sheets present in the workbook.
        available: Vec<String>,
    },

    /// The workbook contains no worksheets.
    #[error("workbook contains no worksheets")]
    EmptyWorkbook,

    /// An I/O or parsing error from the calamine library.
    #[error("Excel read error: {detail}")]
    ExcelRead {
        /// Human-readable description of the error.
        detail: String,
    },
}
