//! Tier 2: raw CORD-19 metadata with inline cleaning.
//!
//! Cleaning rules, applied per row:
//! - rows without a title are dropped
//! - `publish_time` is parsed; unparseable values become missing instead of failing the batch
//! - `publication_year` is derived from the date; rows whose year is missing or outside
//!   `[min_year, max_year]` are dropped, whether or not a year filter is used later
//! - a missing abstract becomes the empty string
//! - when a journal column exists, missing journals become `"Unknown"` and values are title-cased

use std::path::PathBuf;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::schema::{self, cell, open_csv};
use super::{Provenance, SourceTier};
use crate::error::SourceResult;
use crate::models::{Capabilities, Paper, Table};

/// Sentinel for rows with no journal.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Raw CSV source.
#[derive(Debug, Clone)]
pub struct RawSource {
    path: PathBuf,
    name: String,
    years: (i32, i32),
}

/// Row accounting for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub missing_title: usize,
    pub unparsed_date: usize,
    pub year_out_of_range: usize,
    pub rows_kept: usize,
}

impl RawSource {
    /// Raw source keeping publication years in `[min_year, max_year]`.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        min_year: i32,
        max_year: i32,
    ) -> Self {
        Self { path: path.into(), name: name.into(), years: (min_year, max_year) }
    }

    /// Load and clean, also returning the row accounting.
    pub fn load_with_report(&self) -> SourceResult<(Table, CleaningReport)> {
        let (mut reader, schema) = open_csv(&self.path)?;
        let title_col = schema::require(schema.title, "title", &self.name)?;
        let abstract_col = schema::require(schema.r#abstract, "abstract", &self.name)?;
        let date_col = schema::require(schema.publish_time, "publish_time", &self.name)?;
        let has_journal = schema.journal.is_some();
        let (min_year, max_year) = self.years;

        let mut report = CleaningReport::default();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            report.rows_read += 1;

            let Some(title) = cell(&record, Some(title_col)) else {
                report.missing_title += 1;
                continue;
            };

            let Some(date) = cell(&record, Some(date_col)).and_then(parse_publish_time) else {
                report.unparsed_date += 1;
                continue;
            };
            if !(min_year..=max_year).contains(&date.year()) {
                report.year_out_of_range += 1;
                continue;
            }

            let mut paper = Paper::new(title, cell(&record, Some(abstract_col)).unwrap_or_default())
                .with_publish_time(date);
            if has_journal {
                let journal = cell(&record, schema.journal);
                paper.journal =
                    Some(journal.map_or_else(|| UNKNOWN_JOURNAL.to_string(), title_case));
            }
            rows.push(paper);
        }

        report.rows_kept = rows.len();
        tracing::info!(
            source = %self.name,
            read = report.rows_read,
            kept = report.rows_kept,
            missing_title = report.missing_title,
            unparsed_date = report.unparsed_date,
            year_out_of_range = report.year_out_of_range,
            "Cleaned raw source"
        );

        Ok((Table::new(rows, Capabilities { journal: has_journal, year: true }), report))
    }
}

impl SourceTier for RawSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn provenance(&self) -> Provenance {
        Provenance::RawCleaned
    }

    fn success_message(&self) -> String {
        format!("Loaded {} with basic cleaning!", self.name)
    }

    fn load(&self) -> SourceResult<Table> {
        self.load_with_report().map(|(table, _)| table)
    }
}

/// Parse a publication date, returning `None` for anything unrecognized.
///
/// Accepts plain dates, date-times (the time is dropped), RFC 3339 timestamps,
/// `YYYY-MM` (first of month) and bare `YYYY` (first of year).
#[must_use]
pub fn parse_publish_time(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1);
    }
    if value.len() == 7 && value.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok();
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Title-case a journal name: the first letter of every alphabetic run is upper-cased,
/// the rest lower-cased (`"the LANCET"` → `"The Lancet"`, `"covid-19 j"` → `"Covid-19 J"`).
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
