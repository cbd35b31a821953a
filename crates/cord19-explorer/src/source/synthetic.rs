//! Tier 3: fixed demonstration table used when no real source is usable.

use chrono::NaiveDate;

use crate::models::{Capabilities, Paper, Table};

const SAMPLE: [(&str, &str, (i32, u32, u32), &str); 3] = [
    (
        "COVID-19 Research Paper 1",
        "Abstract text 1 about coronavirus and pandemic",
        (2020, 3, 15),
        "Journal of Medicine",
    ),
    (
        "Study on Coronavirus 2",
        "Abstract text 2 about vaccines and treatment",
        (2020, 4, 20),
        "Lancet",
    ),
    (
        "SARS-CoV-2 Analysis",
        "Abstract text 3 about social distancing measures",
        (2021, 1, 10),
        "Nature",
    ),
];

/// In-memory fallback. Loading cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    /// Message shown when this tier is used.
    pub const MESSAGE: &'static str = "Using sample data for demonstration.";

    #[must_use]
    pub fn table(&self) -> Table {
        let rows = SAMPLE
            .iter()
            .map(|&(title, r#abstract, (y, m, d), journal)| {
                let paper = Paper::new(title, r#abstract).with_journal(journal);
                match NaiveDate::from_ymd_opt(y, m, d) {
                    Some(date) => paper.with_publish_time(date),
                    None => paper.with_year(y),
                }
            })
            .collect();
        Table::new(rows, Capabilities::FULL)
    }
}
