//! Markdown rendering of a dashboard view.

use std::borrow::Cow;

use crate::dashboard::DashboardView;
use crate::source::StatusLevel;

/// Format a full dashboard view as Markdown.
#[must_use]
pub fn format_dashboard_markdown(view: &DashboardView) -> String {
    let mut output = String::from("# CORD-19 COVID-19 Research Data Explorer\n\n");

    for status in &view.statuses {
        let marker = match status.level {
            StatusLevel::Success => "✅",
            StatusLevel::Info => "ℹ️",
            StatusLevel::Error => "❌",
        };
        output.push_str(&format!("> {marker} {}\n", status.message));
    }
    if !view.statuses.is_empty() {
        output.push('\n');
    }

    if let Some(warning) = &view.warning {
        output.push_str(&format!("⚠️ {warning}\n"));
        return output;
    }

    output.push_str(&format!("*Source: {}*\n\n", view.provenance));

    // Overview
    output.push_str("## Overview\n\n");
    output.push_str(&format!(
        "**Total Papers**: {} | **Unique Journals**: {} | **Average Abstract Length**: {}\n\n",
        view.summary.total_papers, view.unique_journals, view.average_abstract_length
    ));

    if !view.counts_by_year.is_empty() {
        output.push_str("## Papers by Year\n\n| Year | Papers |\n|---|---|\n");
        for c in &view.counts_by_year {
            output.push_str(&format!("| {} | {} |\n", c.year, c.count));
        }
        output.push('\n');
    }

    if !view.top_journals.is_empty() {
        output.push_str("## Top Journals\n\n");
        for (i, j) in view.top_journals.iter().enumerate() {
            output.push_str(&format!("{}. {} ({})\n", i + 1, j.journal, j.count));
        }
        output.push('\n');
    }

    if !view.top_title_words.is_empty() {
        output.push_str("## Top Words in Titles\n\n");
        let words: Vec<String> =
            view.top_title_words.iter().map(|w| format!("{} ({})", w.word, w.count)).collect();
        output.push_str(&format!("{}\n\n", words.join(", ")));
    }

    if !view.sample.is_empty() {
        output.push_str("## Sample Data\n\n");
        output.push_str(&format!("| {} |\n", view.sample_columns.join(" | ")));
        output.push_str(&format!("|{}\n", "---|".repeat(view.sample_columns.len())));
        for row in &view.sample {
            let mut cells = vec![truncate(&row.title, 80).replace('|', "\\|")];
            if let Some(journal) = &row.journal {
                cells.push(journal.replace('|', "\\|"));
            }
            if view.sample_columns.contains(&"publication_year") {
                cells.push(row.publication_year.map(|y| y.to_string()).unwrap_or_default());
            }
            cells.push(row.abstract_word_count.to_string());
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
    }

    output
}

fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &text[..idx])),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FilterControls;
    use crate::source::{Provenance, Resolved, StatusSignal, SyntheticSource};

    fn synthetic_view() -> DashboardView {
        let resolved = Resolved {
            table: SyntheticSource.table(),
            provenance: Provenance::Synthetic,
            statuses: vec![StatusSignal::info(SyntheticSource::MESSAGE)],
        };
        let filter = FilterControls::from_table(&resolved.table).default_state();
        DashboardView::build(&resolved, &filter)
    }

    #[test]
    fn test_dashboard_markdown_sections() {
        let md = format_dashboard_markdown(&synthetic_view());

        assert!(md.contains("Using sample data for demonstration."));
        assert!(md.contains("*Source: synthetic*"));
        assert!(md.contains("**Total Papers**: 3"));
        assert!(md.contains("| 2020 | 2 |"));
        assert!(md.contains("## Top Journals"));
        assert!(md.contains("| title | journal | publication_year | abstract_word_count |"));
        assert!(md.contains("| SARS-CoV-2 Analysis | Nature | 2021 | 7 |"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
