//! Data models for paper tables and filter state.

mod filter;
mod paper;
mod table;

pub use filter::{ALL_JOURNALS, FilterQuery, FilterState, JournalSelection};
pub use paper::{Paper, word_count};
pub use table::{Capabilities, Table};
