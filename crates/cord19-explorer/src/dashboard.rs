//! Dashboard view model.
//!
//! [`FilterControls`] describes the selectors the presentation layer should offer for
//! a loaded table; [`DashboardView`] bundles every panel's data for one interaction.

use serde::Serialize;

use crate::config::defaults;
use crate::error::{ViewError, ViewResult};
use crate::export::display_columns;
use crate::models::{ALL_JOURNALS, FilterQuery, FilterState, JournalSelection, Paper, Table};
use crate::pipeline::{self, HistogramBin, JournalCount, SummaryStats, WordFrequency, YearCount};
use crate::source::{Provenance, Resolved, StatusSignal};

/// Warning shown when the loaded table has no rows.
pub const NO_DATA_WARNING: &str = "No data available. Please check your data file.";

/// Selector bounds and options derived from the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControls {
    /// Year slider bounds.
    pub year_bounds: (i32, i32),

    /// `"All"` followed by journal choices.
    pub journal_options: Vec<String>,

    /// Word-count slider bounds.
    pub word_bounds: (usize, usize),

    /// Word-count selection the slider starts at.
    pub default_words: (usize, usize),

    /// Notices for selectors that degrade because a column is missing.
    pub notices: Vec<String>,
}

impl FilterControls {
    /// Derive controls from a table.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let mut notices = Vec::new();

        let year_range = table.has_year().then(|| {
            let years = table.iter().filter_map(|p| p.publication_year);
            let min = years.clone().min()?;
            let max = years.max()?;
            Some((min, max))
        });
        let year_bounds = match year_range {
            Some(Some(bounds)) => bounds,
            Some(None) => defaults::FALLBACK_YEAR_RANGE,
            None => {
                notices.push("Year data not available".to_string());
                defaults::FALLBACK_YEAR_RANGE
            }
        };

        let mut journal_options = vec![ALL_JOURNALS.to_string()];
        if table.has_journal() {
            let mut first_seen: Vec<&str> = Vec::new();
            for journal in table.iter().filter_map(|p| p.journal.as_deref()) {
                if first_seen.len() == defaults::JOURNAL_OPTIONS {
                    break;
                }
                if !first_seen.contains(&journal) {
                    first_seen.push(journal);
                }
            }
            first_seen.sort_unstable();
            journal_options.extend(first_seen.into_iter().map(str::to_string));
        } else {
            notices.push("Journal data not available".to_string());
        }

        Self {
            year_bounds,
            journal_options,
            word_bounds: defaults::WORD_SLIDER_BOUNDS,
            default_words: defaults::WORD_RANGE,
            notices,
        }
    }

    /// The filter the controls start at.
    #[must_use]
    pub fn default_state(&self) -> FilterState {
        FilterState::new(
            self.year_bounds.0..=self.year_bounds.1,
            JournalSelection::All,
            self.default_words.0..=self.default_words.1,
        )
    }

    /// Fill omitted query fields with defaults and validate the ranges.
    ///
    /// An omitted bound never conflicts with a supplied one: it is clamped to it.
    /// Only a range given inverted on both ends is rejected.
    pub fn resolve(&self, query: &FilterQuery) -> ViewResult<FilterState> {
        let (year_lo, year_hi) = resolve_range(query.year_lo, query.year_hi, self.year_bounds)
            .ok_or_else(|| ViewError::validation("year_lo", "must not exceed year_hi"))?;
        let (words_lo, words_hi) = resolve_range(query.words_lo, query.words_hi, self.default_words)
            .ok_or_else(|| ViewError::validation("words_lo", "must not exceed words_hi"))?;

        let journal =
            query.journal.as_deref().map_or(JournalSelection::All, JournalSelection::parse);

        Ok(FilterState::new(year_lo..=year_hi, journal, words_lo..=words_hi))
    }
}

fn resolve_range<T: Copy + Ord>(lo: Option<T>, hi: Option<T>, defaults: (T, T)) -> Option<(T, T)> {
    match (lo, hi) {
        (Some(lo), Some(hi)) => (lo <= hi).then_some((lo, hi)),
        (Some(lo), None) => Some((lo, defaults.1.max(lo))),
        (None, Some(hi)) => Some((defaults.0.min(hi), hi)),
        (None, None) => Some(defaults),
    }
}

/// A row of the sample table, in display columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    pub abstract_word_count: usize,
}

impl SampleRow {
    fn from_paper(paper: &Paper, table: &Table) -> Self {
        Self {
            title: paper.title.clone(),
            journal: table.has_journal().then(|| paper.journal_or_empty().to_string()),
            publication_year: if table.has_year() { paper.publication_year } else { None },
            abstract_word_count: paper.abstract_word_count,
        }
    }
}

/// Everything the presentation layer renders for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub provenance: Provenance,
    pub degraded: bool,
    pub statuses: Vec<StatusSignal>,

    /// Set when the loaded table is empty; all panels are then empty too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    pub filter: FilterState,
    pub summary: SummaryStats,
    pub unique_journals: String,
    pub average_abstract_length: String,
    pub counts_by_year: Vec<YearCount>,
    pub top_journals: Vec<JournalCount>,
    pub top_title_words: Vec<WordFrequency>,
    pub abstract_histogram: Vec<HistogramBin>,
    pub sample_columns: Vec<&'static str>,
    pub sample: Vec<SampleRow>,
}

impl DashboardView {
    /// Filter the resolved table and compute every panel.
    #[must_use]
    pub fn build(resolved: &Resolved, filter: &FilterState) -> Self {
        let source = &resolved.table;
        let warning = source.is_empty().then(|| NO_DATA_WARNING.to_string());
        let filtered = pipeline::apply(source, filter);
        let summary = pipeline::summary_stats(&filtered);

        tracing::debug!(
            provenance = %resolved.provenance,
            rows = filtered.len(),
            "Built dashboard view"
        );

        Self {
            provenance: resolved.provenance,
            degraded: resolved.is_degraded(),
            statuses: resolved.statuses.clone(),
            warning,
            filter: filter.clone(),
            unique_journals: summary.unique_journals_label(),
            average_abstract_length: summary.mean_abstract_words.map_or_else(
                || "N/A".to_string(),
                |_| format!("{} words", summary.mean_abstract_words_label()),
            ),
            summary,
            counts_by_year: pipeline::counts_by_year(&filtered),
            top_journals: pipeline::top_journals(&filtered, defaults::TOP_JOURNALS),
            top_title_words: pipeline::top_title_words(&filtered, defaults::TOP_TITLE_WORDS),
            abstract_histogram: pipeline::word_count_histogram(&filtered, defaults::HISTOGRAM_BINS),
            sample_columns: display_columns(&filtered),
            sample: filtered
                .iter()
                .take(defaults::SAMPLE_ROWS)
                .map(|p| SampleRow::from_paper(p, &filtered))
                .collect(),
        }
    }
}
