//! Column detection and cell normalization for CSV sources.

use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::{SourceError, SourceResult};
use crate::models::Capabilities;

/// Cell spellings read as missing values.
const MISSING_TOKENS: &[&str] =
    &["", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A"];

/// Positions of the known columns in a CSV header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub title: Option<usize>,
    pub r#abstract: Option<usize>,
    pub publish_time: Option<usize>,
    pub journal: Option<usize>,
    pub publication_year: Option<usize>,
}

impl Schema {
    /// Locate known columns by exact (trimmed) header name. Unknown columns are ignored.
    #[must_use]
    pub fn detect(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            title: position("title"),
            r#abstract: position("abstract"),
            publish_time: position("publish_time"),
            journal: position("journal"),
            publication_year: position("publication_year"),
        }
    }

    /// Capability flags as the columns stand, without derivation.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities { journal: self.journal.is_some(), year: self.publication_year.is_some() }
    }
}

/// Demand a column position, naming the source on failure.
pub fn require(
    position: Option<usize>,
    column: &'static str,
    source_name: &str,
) -> SourceResult<usize> {
    position.ok_or_else(|| SourceError::missing_column(column, source_name))
}

/// Open a CSV file with a header row.
pub fn open_csv(path: &Path) -> SourceResult<(Reader<File>, Schema)> {
    let file = File::open(path).map_err(|e| SourceError::unavailable(path, e))?;
    let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);
    let schema = Schema::detect(reader.headers()?);
    Ok((reader, schema))
}

/// Read a cell, mapping missing-value spellings (and absent columns) to `None`.
#[must_use]
pub fn cell(record: &StringRecord, position: Option<usize>) -> Option<&str> {
    let value = record.get(position?)?;
    if is_missing(value) { None } else { Some(value) }
}

/// Whether a raw cell value stands for a missing value.
///
/// Matching is exact: padded tokens and whitespace-only cells are values.
#[must_use]
pub fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

/// Parse a year spelled as an integer or an integral float (`2020`, `2020.0`).
#[must_use]
pub fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() <= f64::from(i32::MAX) {
        Some(float as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_columns() {
        let headers = StringRecord::from(vec!["cord_uid", " title", "abstract", "journal"]);
        let schema = Schema::detect(&headers);

        assert_eq!(schema.title, Some(1));
        assert_eq!(schema.r#abstract, Some(2));
        assert_eq!(schema.journal, Some(3));
        assert_eq!(schema.publish_time, None);
        assert_eq!(schema.capabilities(), Capabilities { journal: true, year: false });
    }

    #[test]
    fn test_cell_missing_tokens() {
        let record = StringRecord::from(vec!["", "NaN", " value ", "None"]);
        assert_eq!(cell(&record, Some(0)), None);
        assert_eq!(cell(&record, Some(1)), None);
        assert_eq!(cell(&record, Some(2)), Some(" value "));
        assert_eq!(cell(&record, Some(3)), None);
        assert_eq!(cell(&record, Some(9)), None);
        assert_eq!(cell(&record, None), None);
    }

    #[test]
    fn test_padded_tokens_are_values() {
        let record = StringRecord::from(vec!["   ", "NA ", " NaN"]);
        assert_eq!(cell(&record, Some(0)), Some("   "));
        assert_eq!(cell(&record, Some(1)), Some("NA "));
        assert_eq!(cell(&record, Some(2)), Some(" NaN"));
        assert!(is_missing("NA"));
        assert!(!is_missing("NA "));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year(" 2019 "), Some(2019));
        assert_eq!(parse_year("2020.5"), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn test_require() {
        assert_eq!(require(Some(2), "title", "x.csv").unwrap(), 2);
        let err = require(None, "title", "x.csv").unwrap_err();
        assert!(err.to_string().contains("x.csv"));
    }
}
