//! CSV export of the filtered view.

use std::io::Write;

use crate::config::defaults;
use crate::error::ViewResult;
use crate::models::Table;

/// Download file name.
pub const FILE_NAME: &str = defaults::EXPORT_FILE_NAME;

/// Download MIME type.
pub const MIME_TYPE: &str = "text/csv";

/// Columns shown for a table, in fixed order; optional ones only when present.
#[must_use]
pub fn display_columns(table: &Table) -> Vec<&'static str> {
    let mut columns = vec!["title"];
    if table.has_journal() {
        columns.push("journal");
    }
    if table.has_year() {
        columns.push("publication_year");
    }
    columns.push("abstract_word_count");
    columns
}

/// Write the table as CSV with a header row and no index column.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> ViewResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(display_columns(table))?;

    for paper in table {
        let mut record = vec![paper.title.clone()];
        if table.has_journal() {
            record.push(paper.journal_or_empty().to_string());
        }
        if table.has_year() {
            record.push(paper.publication_year.map(|y| y.to_string()).unwrap_or_default());
        }
        record.push(paper.abstract_word_count.to_string());
        csv.write_record(&record)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export the table to a CSV string.
pub fn export_csv(table: &Table) -> ViewResult<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
