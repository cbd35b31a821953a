//! Tests for the CSV export of filtered views.

use cord19_explorer::export;
use cord19_explorer::models::{Capabilities, FilterState, JournalSelection, Paper, Table};
use cord19_explorer::pipeline;

fn papers() -> Vec<Paper> {
    vec![
        Paper::new("Masks, \"real\" evidence", "one two three")
            .with_journal("Lancet")
            .with_year(2020),
        Paper::new("Line\nbreak title", "").with_journal("Nature").with_year(2021),
        Paper::new("Vaccine trial", "a b").with_journal("Lancet").with_year(2022),
    ]
}

fn parse(body: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_export_reparses_to_filtered_view() {
    let table = Table::new(papers(), Capabilities::FULL);
    let filter = FilterState::new(2020..=2021, JournalSelection::All, 0..=500);
    let filtered = pipeline::apply(&table, &filter);

    let body = export::export_csv(&filtered).unwrap();
    let (headers, rows) = parse(&body);

    assert_eq!(headers, vec!["title", "journal", "publication_year", "abstract_word_count"]);
    assert_eq!(rows.len(), filtered.len());
    assert_eq!(rows[0], vec!["Masks, \"real\" evidence", "Lancet", "2020", "3"]);
    assert_eq!(rows[1], vec!["Line\nbreak title", "Nature", "2021", "0"]);
}

#[test]
fn test_export_omits_missing_columns() {
    let table = Table::new(papers(), Capabilities::NONE);
    let body = export::export_csv(&table).unwrap();
    let (headers, rows) = parse(&body);

    assert_eq!(headers, vec!["title", "abstract_word_count"]);
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_export_empty_view_has_header_only() {
    let table = Table::new(papers(), Capabilities::FULL);
    let filter = FilterState::new(1990..=1991, JournalSelection::All, 0..=500);
    let body = export::export_csv(&pipeline::apply(&table, &filter)).unwrap();

    assert_eq!(body.lines().count(), 1);
}

#[test]
fn test_write_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(export::FILE_NAME);
    let table = Table::new(papers(), Capabilities::FULL);

    export::write_csv(&table, std::fs::File::create(&path).unwrap()).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body, export::export_csv(&table).unwrap());
}
