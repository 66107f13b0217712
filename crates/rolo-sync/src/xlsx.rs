use crate::error::{Result, SyncError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rolo_core::domain::normalize_phone;
use rolo_core::rules::CandidateRow;
use std::path::Path;

const NAME_HEADER: &str = "name";
const EMAIL_HEADER: &str = "email";
const PHONE_HEADER: &str = "phone";
const COUNTRY_HEADER: &str = "country";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSheet {
    pub rows: Vec<CandidateRow>,
    /// Entirely blank data rows, skipped without complaint.
    pub skipped_empty: usize,
}

/// Reads the first sheet of an `.xlsx`/`.xls` workbook and extracts candidate
/// rows. The whole file is buffered; files are assumed small enough for that.
pub fn read_sheet(path: &Path, default_country_code: &str) -> Result<ExtractedSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SyncError::EmptySheet)??;
    let grid = grid_from_range(&range);
    extract_from_grid(&grid, default_country_code)
}

/// Locates the header row by fuzzy column-name matching and maps the rows
/// below it to candidate contacts. Fails only when no row looks like a
/// header; incomplete data rows are emitted as-is for the validator to drop.
pub fn extract_from_grid(
    grid: &[Vec<String>],
    default_country_code: &str,
) -> Result<ExtractedSheet> {
    let (header_index, columns) = locate_header(grid).ok_or(SyncError::HeaderNotFound)?;

    let mut rows = Vec::new();
    let mut skipped_empty = 0;

    for raw in grid.iter().skip(header_index + 1) {
        let name = cell_at(raw, columns.name);
        let email = cell_at(raw, columns.email);
        let phone = cell_at(raw, columns.phone);
        let country = cell_at(raw, columns.country);

        if name.is_empty() && email.is_empty() && phone.is_empty() && country.is_empty() {
            skipped_empty += 1;
            continue;
        }

        let normalized = normalize_phone(&phone, Some(country.as_str()), default_country_code);
        rows.push(CandidateRow {
            name,
            email,
            country_code: normalized.country_code,
            phone: normalized.phone,
        });
    }

    Ok(ExtractedSheet {
        rows,
        skipped_empty,
    })
}

#[derive(Debug, Clone, Copy, Default)]
struct HeaderColumns {
    name: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    country: Option<usize>,
}

/// The first row containing at least one cell whose lower-cased text contains
/// `name`, `email`, or `phone` wins; substring match lets `"Full Name"` or
/// `"Email Address"` qualify.
fn locate_header(grid: &[Vec<String>]) -> Option<(usize, HeaderColumns)> {
    for (index, row) in grid.iter().enumerate() {
        let mut columns = HeaderColumns::default();
        for (col, cell) in row.iter().enumerate() {
            let lowered = cell.trim().to_ascii_lowercase();
            if lowered.is_empty() {
                continue;
            }
            if columns.country.is_none() && lowered.contains(COUNTRY_HEADER) {
                columns.country = Some(col);
                continue;
            }
            if columns.name.is_none() && lowered.contains(NAME_HEADER) {
                columns.name = Some(col);
            } else if columns.email.is_none() && lowered.contains(EMAIL_HEADER) {
                columns.email = Some(col);
            } else if columns.phone.is_none() && lowered.contains(PHONE_HEADER) {
                columns.phone = Some(col);
            }
        }
        if columns.name.is_some() || columns.email.is_some() || columns.phone.is_some() {
            return Some((index, columns));
        }
    }
    None
}

fn cell_at(row: &[String], column: Option<usize>) -> String {
    column
        .and_then(|idx| row.get(idx))
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default()
}

fn grid_from_range(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(render_cell).collect())
        .collect()
}

// Spreadsheets routinely store phone numbers as floats; f64's Display drops
// the trailing `.0`, so integral values come out as plain digit runs.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_from_grid, SyncError};

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn extract_matches_exact_headers() {
        let grid = grid(&[
            &["name", "email", "phone"],
            &["Jane Doe", "jane@x.com", "(415) 555-1212"],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].name, "Jane Doe");
        assert_eq!(sheet.rows[0].country_code, "+1");
        assert_eq!(sheet.rows[0].phone, "4155551212");
    }

    #[test]
    fn extract_matches_headers_by_substring() {
        let grid = grid(&[
            &["Full Name", "Email Address", "Phone"],
            &["Jane Doe", "jane@x.com", "4155551212"],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].email, "jane@x.com");
    }

    #[test]
    fn extract_skips_preamble_rows_before_header() {
        let grid = grid(&[
            &["Q3 leads", ""],
            &["", ""],
            &["name", "email", "phone"],
            &["Jane", "jane@x.com", "4155551212"],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn extract_fails_without_header_row() {
        let grid = grid(&[
            &["Jane Doe", "jane@x.com", "4155551212"],
            &["John Doe", "john@x.com", "4155551213"],
        ]);
        let err = extract_from_grid(&grid, "+1").unwrap_err();
        assert!(matches!(err, SyncError::HeaderNotFound));
    }

    #[test]
    fn extract_uses_country_code_column_when_present() {
        let grid = grid(&[
            &["name", "email", "phone", "country_code"],
            &["Raj", "raj@x.com", "98765 43210", "+91"],
            &["Jane", "jane@x.com", "4155551212", ""],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows[0].country_code, "+91");
        assert_eq!(sheet.rows[1].country_code, "+1");
    }

    #[test]
    fn extract_plus_prefixed_phone_overrides_country_column() {
        let grid = grid(&[
            &["name", "email", "phone"],
            &["Jane Doe", "jane@x.com", "+44 20 7946 0958"],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows[0].country_code, "+44");
        assert_eq!(sheet.rows[0].phone, "2079460958");
    }

    #[test]
    fn extract_skips_blank_rows_without_error() {
        let grid = grid(&[
            &["name", "email", "phone"],
            &["", "", ""],
            &["Jane", "jane@x.com", "4155551212"],
            &["", "", ""],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.skipped_empty, 2);
    }

    #[test]
    fn extract_emits_partial_rows_for_the_validator() {
        let grid = grid(&[
            &["name", "email", "phone"],
            &["Jane", "", "4155551212"],
        ]);
        let sheet = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert!(sheet.rows[0].email.is_empty());
    }

    #[test]
    fn extract_is_deterministic_for_equal_input() {
        let grid = grid(&[
            &["name", "email", "phone"],
            &["Jane", "jane@x.com", "4155551212"],
            &["John", "john@x.com", "4155551213"],
        ]);
        let first = extract_from_grid(&grid, "+1").unwrap();
        let second = extract_from_grid(&grid, "+1").unwrap();
        assert_eq!(first, second);
    }
}
