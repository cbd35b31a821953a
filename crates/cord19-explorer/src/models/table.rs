//! Capability-flagged paper table.
//!
//! Optional columns (journal, publication year) are described once at table level.
//! Consumers branch on [`Table::has_journal`] / [`Table::has_year`] instead of
//! inspecting rows to guess whether a column exists.

use serde::{Deserialize, Serialize};

use super::Paper;

/// Which optional columns a table carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Source had a journal column.
    pub journal: bool,

    /// Source had (or derived) a publication year column.
    pub year: bool,
}

impl Capabilities {
    /// Both optional columns present.
    pub const FULL: Self = Self { journal: true, year: true };

    /// No optional columns.
    pub const NONE: Self = Self { journal: false, year: false };
}

/// An ordered sequence of papers plus capability flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Paper>,
    capabilities: Capabilities,
}

impl Table {
    /// Build a table, normalizing each row.
    ///
    /// Word counts are recomputed and attributes the capabilities rule out are cleared,
    /// so a table never carries a journal value while claiming no journal column.
    #[must_use]
    pub fn new(rows: Vec<Paper>, capabilities: Capabilities) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut paper| {
                paper.recount_words();
                if !capabilities.journal {
                    paper.journal = None;
                }
                if !capabilities.year {
                    paper.publication_year = None;
                }
                paper
            })
            .collect();
        Self { rows, capabilities }
    }

    /// Build a table sharing this table's capabilities.
    #[must_use]
    pub fn derive(&self, rows: Vec<Paper>) -> Self {
        Self::new(rows, self.capabilities)
    }

    /// Whether a journal column is present.
    #[must_use]
    pub const fn has_journal(&self) -> bool {
        self.capabilities.journal
    }

    /// Whether a publication year column is present.
    #[must_use]
    pub const fn has_year(&self) -> bool {
        self.capabilities.year
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub fn rows(&self) -> &[Paper] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paper> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows as a new table.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self { rows: self.rows.iter().take(n).cloned().collect(), capabilities: self.capabilities }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Paper;
    type IntoIter = std::slice::Iter<'a, Paper>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
