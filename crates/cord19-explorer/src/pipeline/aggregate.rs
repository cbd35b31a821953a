//! Reductions over a filtered table: year counts, top journals, title word
//! frequencies, summary statistics and the abstract length histogram.
//!
//! Ranked outputs sort by count descending; ties keep first-encountered order.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Table;

/// Words never counted in titles.
pub const STOP_WORDS: &[&str] =
    &["the", "and", "of", "in", "to", "a", "for", "on", "with", "by", "an", "as", "at"];

static TITLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("valid title word pattern"));

/// Papers per publication year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Papers per journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalCount {
    pub journal: String,
    pub count: usize,
}

/// Occurrences of a title word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// One histogram bin, `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_papers: usize,

    /// `None` when the table has no journal column.
    pub unique_journals: Option<usize>,

    /// `None` for an empty table.
    pub mean_abstract_words: Option<f64>,
}

impl SummaryStats {
    /// Distinct journal count, or `"N/A"`.
    #[must_use]
    pub fn unique_journals_label(&self) -> String {
        self.unique_journals.map_or_else(|| "N/A".to_string(), |n| n.to_string())
    }

    /// Mean abstract length to one decimal place, or `"N/A"`.
    #[must_use]
    pub fn mean_abstract_words_label(&self) -> String {
        self.mean_abstract_words.map_or_else(|| "N/A".to_string(), |m| format!("{m:.1}"))
    }
}

/// Row count per year, ascending. Empty when the table has no year column.
#[must_use]
pub fn counts_by_year(table: &Table) -> Vec<YearCount> {
    if !table.has_year() {
        return Vec::new();
    }
    let mut counts = BTreeMap::new();
    for year in table.iter().filter_map(|p| p.publication_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().map(|(year, count)| YearCount { year, count }).collect()
}

/// The `k` most frequent journals. Empty when the table has no journal column.
#[must_use]
pub fn top_journals(table: &Table, k: usize) -> Vec<JournalCount> {
    if !table.has_journal() {
        return Vec::new();
    }
    top_k(count_in_order(table.iter().filter_map(|p| p.journal.as_deref())), k)
        .into_iter()
        .map(|(journal, count)| JournalCount { journal, count })
        .collect()
}

/// Lower-cased alphabetic runs of length ≥ 4 from the given titles, stop-words removed.
///
/// Runs are delimited by word boundaries, so digits glued to letters disqualify the run
/// while hyphens split it: `"COVID-19"` yields `"covid"`.
pub fn title_tokens<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    titles
        .into_iter()
        .flat_map(|title| {
            let lowered = title.to_lowercase();
            TITLE_WORD
                .find_iter(&lowered)
                .map(|m| m.as_str().to_string())
                .filter(|word| !STOP_WORDS.contains(&word.as_str()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The `k` most frequent title words.
#[must_use]
pub fn top_title_words(table: &Table, k: usize) -> Vec<WordFrequency> {
    let tokens = title_tokens(table.iter().map(|p| p.title.as_str()));
    top_k(count_in_order(tokens.iter().map(String::as_str)), k)
        .into_iter()
        .map(|(word, count)| WordFrequency { word, count })
        .collect()
}

/// Total rows, distinct journals and mean abstract length.
#[must_use]
pub fn summary_stats(table: &Table) -> SummaryStats {
    let unique_journals = table.has_journal().then(|| {
        let mut seen: Vec<&str> = table.iter().filter_map(|p| p.journal.as_deref()).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    });

    let mean_abstract_words = (!table.is_empty()).then(|| {
        let total: usize = table.iter().map(|p| p.abstract_word_count).sum();
        total as f64 / table.len() as f64
    });

    SummaryStats { total_papers: table.len(), unique_journals, mean_abstract_words }
}

/// Equal-width histogram of abstract word counts over `[min, max]`.
///
/// A single distinct value spreads over `[v - 0.5, v + 0.5]`. Empty input yields no bins.
#[must_use]
pub fn word_count_histogram(table: &Table, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = table.iter().map(|p| p.abstract_word_count as f64).collect();
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Count keys, keeping the order in which each key was first seen.
fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts
}

/// Stable sort by count descending, then truncate.
fn top_k(mut counts: Vec<(String, usize)>, k: usize) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capabilities, Paper};

    fn paper(title: &str, journal: &str, year: i32, words: &str) -> Paper {
        Paper::new(title, words).with_journal(journal).with_year(year)
    }

    #[test]
    fn test_counts_by_year_ascending() {
        let table = Table::new(
            vec![paper("a", "J", 2021, ""), paper("b", "J", 2020, ""), paper("c", "J", 2021, "")],
            Capabilities::FULL,
        );
        assert_eq!(
            counts_by_year(&table),
            vec![YearCount { year: 2020, count: 1 }, YearCount { year: 2021, count: 2 }]
        );
        assert!(counts_by_year(&Table::new(table.rows().to_vec(), Capabilities::NONE)).is_empty());
    }

    #[test]
    fn test_top_journals_ties_first_seen() {
        let table = Table::new(
            vec![
                paper("1", "Beta", 2020, ""),
                paper("2", "Alpha", 2020, ""),
                paper("3", "Gamma", 2020, ""),
                paper("4", "Gamma", 2020, ""),
                paper("5", "Alpha", 2020, ""),
            ],
            Capabilities::FULL,
        );
        let top = top_journals(&table, 2);
        assert_eq!(
            top,
            vec![
                JournalCount { journal: "Alpha".to_string(), count: 2 },
                JournalCount { journal: "Gamma".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_title_tokens() {
        let tokens = title_tokens(["COVID-19 Research Paper 1", "Study on Coronavirus 2"]);
        assert_eq!(tokens, vec!["covid", "research", "paper", "study", "coronavirus"]);

        let tokens = title_tokens(["SARS-CoV-2 Analysis with the Covid19 cohort"]);
        assert_eq!(tokens, vec!["sars", "analysis", "cohort"]);
    }

    #[test]
    fn test_summary_stats() {
        let table = Table::new(
            vec![
                paper("a", "X", 2020, "one two"),
                paper("b", "Y", 2020, "one"),
                paper("c", "X", 2020, ""),
            ],
            Capabilities::FULL,
        );
        let stats = summary_stats(&table);
        assert_eq!(stats.total_papers, 3);
        assert_eq!(stats.unique_journals_label(), "2");
        assert_eq!(stats.mean_abstract_words_label(), "1.0");

        let bare = Table::new(Vec::new(), Capabilities::NONE);
        let stats = summary_stats(&bare);
        assert_eq!(stats.unique_journals_label(), "N/A");
        assert_eq!(stats.mean_abstract_words_label(), "N/A");
    }

    #[test]
    fn test_histogram() {
        let table = Table::new(
            vec![
                paper("a", "X", 2020, ""),
                paper("b", "X", 2020, "a b c d"),
                paper("c", "X", 2020, "a b"),
            ],
            Capabilities::FULL,
        );
        let bins = word_count_histogram(&table, 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 1, 1]);
        assert!((bins[3].upper - 4.0).abs() < f64::EPSILON);

        let single = Table::new(vec![paper("a", "X", 2020, "x y")], Capabilities::FULL);
        let bins = word_count_histogram(&single, 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![0, 1]);

        assert!(word_count_histogram(&Table::default(), 30).is_empty());
    }
}
