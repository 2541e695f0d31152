use configuration::{DataSettings, UniverseSettings};
use data_loader::load_bar_store;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Writes a `{year}_stock_data.csv` file with one row per (ticker, date).
fn write_year_file(dir: &Path, year: i32, rows: &[(&str, &str, f64)]) {
    let mut content = String::from("Date,Ticker,Open,High,Low,Close\n");
    for (ticker, date, close) in rows {
        content.push_str(&format!(
            "{date},{ticker},{close},{close},{close},{close}\n"
        ));
    }
    fs::write(dir.join(format!("{year}_stock_data.csv")), content).unwrap();
}

fn settings(dir: &Path, start_year: i32, end_year: i32) -> DataSettings {
    DataSettings {
        directory: dir.to_path_buf(),
        start_year,
        end_year,
        catalog_path: dir.join("catalog.csv"),
    }
}

#[test]
fn bars_from_all_year_files_are_merged_and_sorted() {
    let dir = tempdir().unwrap();
    write_year_file(
        dir.path(),
        2021,
        &[("AAA", "2021-06-01", 10.0), ("AAA", "2021-06-02", 11.0)],
    );
    write_year_file(dir.path(), 2022, &[("AAA", "2022-06-01", 12.0)]);

    let store = load_bar_store(
        &settings(dir.path(), 2021, 2022),
        &UniverseSettings { min_tenure_years: 1 },
    )
    .unwrap();

    let series = store.series("AAA").unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn instruments_below_the_minimum_tenure_are_dropped() {
    let dir = tempdir().unwrap();
    // One file can carry rows from any year; tenure runs over bar dates.
    write_year_file(
        dir.path(),
        2015,
        &[
            ("OLD", "2015-03-02", 5.0),
            ("OLD", "2025-03-03", 9.0),
            ("NEW", "2025-03-03", 50.0),
        ],
    );
    let store = load_bar_store(
        &settings(dir.path(), 2015, 2015),
        &UniverseSettings { min_tenure_years: 10 },
    )
    .unwrap();

    assert!(store.series("OLD").is_some());
    assert!(store.series("NEW").is_none());
}

#[test]
fn a_missing_year_file_is_a_loader_error() {
    let dir = tempdir().unwrap();
    write_year_file(dir.path(), 2021, &[("AAA", "2021-06-01", 10.0)]);

    let result = load_bar_store(
        &settings(dir.path(), 2021, 2023),
        &UniverseSettings { min_tenure_years: 0 },
    );
    assert!(result.is_err());
}

#[test]
fn an_empty_universe_after_filtering_is_an_error() {
    let dir = tempdir().unwrap();
    write_year_file(dir.path(), 2024, &[("AAA", "2024-01-02", 10.0)]);

    let result = load_bar_store(
        &settings(dir.path(), 2024, 2024),
        &UniverseSettings { min_tenure_years: 10 },
    );
    assert!(matches!(
        result,
        Err(data_loader::error::LoaderError::EmptyUniverse(10))
    ));
}
