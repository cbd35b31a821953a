//! Tier 1: pre-cleaned metadata, used as-is.

use std::path::PathBuf;

use super::raw::parse_publish_time;
use super::schema::{self, cell, open_csv, parse_year};
use super::{Provenance, SourceTier};
use crate::error::SourceResult;
use crate::models::{Paper, Table};

/// Pre-cleaned CSV source.
#[derive(Debug, Clone)]
pub struct CleanedSource {
    path: PathBuf,
    name: String,
}

impl CleanedSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into() }
    }
}

impl SourceTier for CleanedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn provenance(&self) -> Provenance {
        Provenance::Cleaned
    }

    fn success_message(&self) -> String {
        format!("Loaded {} successfully!", self.name)
    }

    fn load(&self) -> SourceResult<Table> {
        let (mut reader, schema) = open_csv(&self.path)?;
        let title_col = schema::require(schema.title, "title", &self.name)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut paper = Paper::new(
                cell(&record, Some(title_col)).unwrap_or_default(),
                cell(&record, schema.r#abstract).unwrap_or_default(),
            );
            paper.journal = cell(&record, schema.journal).map(str::to_string);
            paper.publish_time = cell(&record, schema.publish_time).and_then(parse_publish_time);
            paper.publication_year = cell(&record, schema.publication_year).and_then(parse_year);
            rows.push(paper);
        }

        tracing::debug!(source = %self.name, rows = rows.len(), "Read cleaned source");
        Ok(Table::new(rows, schema.capabilities()))
    }
}
