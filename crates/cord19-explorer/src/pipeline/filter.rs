//! Filter pipeline: `(table, filter state) -> filtered table`.
//!
//! Three predicates over disjoint attributes, so their order does not matter.
//! The input table is never modified; the output rows are fresh copies with
//! `abstract_word_count` recomputed from the abstract.

use crate::models::{FilterState, Paper, Table};

/// One independent filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `publication_year` in range; skipped when the table has no year column.
    Year,
    /// `journal` equals the selection; skipped for "All" or no journal column.
    Journal,
    /// `abstract_word_count` in range; always applied.
    WordCount,
}

impl Predicate {
    pub const ALL: [Self; 3] = [Self::Year, Self::Journal, Self::WordCount];

    /// Whether this predicate participates for the given table and filter.
    #[must_use]
    pub fn is_active(self, table: &Table, filter: &FilterState) -> bool {
        match self {
            Self::Year => table.has_year(),
            Self::Journal => table.has_journal() && !filter.journal.is_all(),
            Self::WordCount => true,
        }
    }

    /// Whether a row (with a freshly computed word count) passes.
    #[must_use]
    pub fn keeps(self, paper: &Paper, filter: &FilterState) -> bool {
        match self {
            Self::Year => paper.publication_year.is_some_and(|y| filter.years.contains(&y)),
            Self::Journal => filter.journal.matches(paper.journal.as_deref()),
            Self::WordCount => filter.words.contains(&paper.abstract_word_count),
        }
    }
}

/// Apply all predicates.
#[must_use]
pub fn apply(table: &Table, filter: &FilterState) -> Table {
    apply_in_order(table, filter, &Predicate::ALL)
}

/// Apply the listed predicates one after another.
///
/// Word counts are recomputed on every copied row regardless of which predicates are listed.
#[must_use]
pub fn apply_in_order(table: &Table, filter: &FilterState, order: &[Predicate]) -> Table {
    let mut rows: Vec<Paper> = table
        .iter()
        .cloned()
        .map(|mut paper| {
            paper.recount_words();
            paper
        })
        .collect();

    for predicate in order.iter().filter(|p| p.is_active(table, filter)) {
        rows.retain(|paper| predicate.keeps(paper, filter));
    }

    tracing::debug!(input = table.len(), output = rows.len(), "Applied filters");
    table.derive(rows)
}
