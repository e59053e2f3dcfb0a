/// Conversion of calamine worksheet cells into row values.
use calamine::{Data, Range};

/// Converts a cell to its textual value; `None` for empty and error cells.
///
/// Whole floats are rendered without a fractional part, so a numeric key
/// typed as `42` in a spreadsheet reads as `"42"` rather than `"42.0"`.
pub fn cell_value(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(if *f == f.floor() && f.abs() < 1e15 {
            format!("{}", *f as i64)
        } else {
            f.to_string()
        }),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) | Data::Empty => None,
    }
}

/// Reads every non-blank row of `range`, top to bottom.
///
/// Rows whose cells are all empty are skipped; trailing empty cells are
/// dropped so short rows stay short.
pub fn range_rows(range: &Range<Data>) -> Vec<Vec<Option<String>>> {
    range
        .rows()
        .filter_map(|row| {
            let mut cells: Vec<Option<String>> = row.iter().map(cell_value).collect();
            while cells.last().is_some_and(Option::is_none) {
                cells.pop();
            }
            if cells.is_empty() { None } else { Some(cells) }
        })
        .collect()
}
