//! Property-based tests for the filter pipeline and aggregations.

use proptest::prelude::*;

use cord19_explorer::models::{
    Capabilities, FilterState, JournalSelection, Paper, Table, word_count,
};
use cord19_explorer::pipeline::{self, Predicate};

const JOURNALS: &[&str] = &["Lancet", "Nature", "BMJ", "Cell", "Science"];

fn arb_paper() -> impl Strategy<Value = Paper> {
    (
        "[A-Za-z0-9 -]{0,40}",
        "[a-z \t\n]{0,80}",
        proptest::option::of(proptest::sample::select(JOURNALS)),
        proptest::option::of(2019i32..2025),
    )
        .prop_map(|(title, r#abstract, journal, year)| {
            let mut paper = Paper::new(title, r#abstract);
            paper.journal = journal.map(str::to_string);
            paper.publication_year = year;
            paper
        })
}

fn arb_table() -> impl Strategy<Value = Table> {
    (proptest::collection::vec(arb_paper(), 0..40), any::<bool>(), any::<bool>())
        .prop_map(|(rows, journal, year)| Table::new(rows, Capabilities { journal, year }))
}

fn arb_filter() -> impl Strategy<Value = FilterState> {
    (
        2018i32..2026,
        0i32..4,
        proptest::option::of(proptest::sample::select(JOURNALS)),
        0usize..15,
        0usize..15,
    )
        .prop_map(|(year_lo, span, journal, w1, w2)| {
            FilterState::new(
                year_lo..=year_lo + span,
                journal.map_or(JournalSelection::All, JournalSelection::parse),
                w1.min(w2)..=w1.max(w2),
            )
        })
}

fn orders() -> Vec<[Predicate; 3]> {
    use Predicate::{Journal, WordCount, Year};
    vec![
        [Year, Journal, WordCount],
        [Year, WordCount, Journal],
        [Journal, Year, WordCount],
        [Journal, WordCount, Year],
        [WordCount, Year, Journal],
        [WordCount, Journal, Year],
    ]
}

proptest! {
    /// Filtering never adds rows.
    #[test]
    fn filtered_rows_are_subset(table in arb_table(), filter in arb_filter()) {
        let filtered = pipeline::apply(&table, &filter);

        prop_assert!(filtered.len() <= table.len());
        for row in &filtered {
            prop_assert!(table.rows().contains(row));
        }
        prop_assert_eq!(filtered.capabilities(), table.capabilities());
    }

    /// Predicate order does not change the result.
    #[test]
    fn predicates_commute(table in arb_table(), filter in arb_filter()) {
        let expected = pipeline::apply(&table, &filter);
        for order in orders() {
            prop_assert_eq!(&pipeline::apply_in_order(&table, &filter, &order), &expected);
        }
    }

    /// Word counts always equal the whitespace token count of the abstract.
    #[test]
    fn word_count_matches_abstract(table in arb_table(), filter in arb_filter()) {
        for row in &pipeline::apply(&table, &filter) {
            prop_assert_eq!(row.abstract_word_count, word_count(&row.r#abstract));
            prop_assert!(filter.words.contains(&row.abstract_word_count));
        }
    }

    /// top_journals returns at most k entries, each at least as frequent as any left out.
    #[test]
    fn top_journals_bounded(table in arb_table(), k in 0usize..6) {
        let top = pipeline::top_journals(&table, k);
        prop_assert!(top.len() <= k);

        let min_returned = top.iter().map(|j| j.count).min();
        let all = pipeline::top_journals(&table, usize::MAX);
        for left_out in all.iter().filter(|j| !top.iter().any(|t| t.journal == j.journal)) {
            if let Some(min) = min_returned {
                prop_assert!(min >= left_out.count);
            }
        }
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    /// Year counts cover exactly the rows with a year, in ascending order.
    #[test]
    fn year_counts_sum_to_rows(table in arb_table()) {
        let counts = pipeline::counts_by_year(&table);
        if table.has_year() {
            let with_year = table.iter().filter(|p| p.publication_year.is_some()).count();
            prop_assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), with_year);
            prop_assert!(counts.windows(2).all(|w| w[0].year < w[1].year));
        } else {
            prop_assert!(counts.is_empty());
        }
    }

    /// Title tokens are lower-case alphabetic, at least 4 long, and never stop-words.
    #[test]
    fn title_tokens_shape(titles in proptest::collection::vec("[A-Za-z0-9 -]{0,30}", 0..10)) {
        let tokens = pipeline::title_tokens(titles.iter().map(String::as_str));
        for token in tokens {
            prop_assert!(token.len() >= 4);
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase()));
            prop_assert!(!pipeline::STOP_WORDS.contains(&token.as_str()));
        }
    }
}

#[test]
fn title_tokens_exact_multiset() {
    let mut tokens =
        pipeline::title_tokens(["COVID-19 Research Paper 1", "Study on Coronavirus 2"]);
    tokens.sort();
    assert_eq!(tokens, vec!["coronavirus", "covid", "paper", "research", "study"]);
}

#[test]
fn top_title_words_counts() {
    let table = Table::new(
        vec![
            Paper::new("Coronavirus transmission in households", ""),
            Paper::new("Household transmission of coronavirus", ""),
            Paper::new("Vaccines with adjuvants", ""),
        ],
        Capabilities::NONE,
    );
    let top = pipeline::top_title_words(&table, 3);

    let words: Vec<_> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
    assert_eq!(words, vec![("coronavirus", 2), ("transmission", 2), ("households", 1)]);
}
