//! Pure transformations over a loaded table.
//!
//! Nothing here touches I/O or the cache: each function reads a table and
//! returns a new value.

pub mod aggregate;
pub mod filter;

pub use aggregate::{
    HistogramBin, JournalCount, STOP_WORDS, SummaryStats, WordFrequency, YearCount, counts_by_year,
    summary_stats, title_tokens, top_journals, top_title_words, word_count_histogram,
};
pub use filter::{Predicate, apply, apply_in_order};
