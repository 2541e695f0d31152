//! # Historical Bar Loader
//!
//! Reads the per-year price CSVs into the immutable `BarStore` at process
//! start. This is the only crate that touches the filesystem for market data;
//! everything downstream consumes the already-parsed store read-only.

use crate::error::LoaderError;
use chrono::{Datelike, NaiveDate};
use configuration::{DataSettings, UniverseSettings};
use core_types::{Bar, BarStore};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub mod error;

/// One row of a `{year}_stock_data.csv` file.
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Open")]
    open: Decimal,
    #[serde(rename = "High")]
    high: Decimal,
    #[serde(rename = "Low")]
    low: Decimal,
    #[serde(rename = "Close")]
    close: Decimal,
}

/// Loads every configured year file, filters the universe down to instruments
/// whose history spans at least the minimum tenure, and builds the store.
pub fn load_bar_store(
    data: &DataSettings,
    universe: &UniverseSettings,
) -> Result<BarStore, LoaderError> {
    let mut bars = Vec::new();
    for year in data.start_year..=data.end_year {
        let path = data.directory.join(format!("{year}_stock_data.csv"));
        read_price_file(&path, &mut bars)?;
    }
    info!(bars = bars.len(), "loaded raw price rows");

    let bars = filter_by_tenure(bars, universe.min_tenure_years)?;
    let store = BarStore::from_bars(bars);
    info!(
        instruments = store.instrument_count(),
        bars = store.bar_count(),
        min_tenure_years = universe.min_tenure_years,
        "built bar store"
    );
    Ok(store)
}

fn read_price_file(path: &Path, bars: &mut Vec<Bar>) -> Result<(), LoaderError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoaderError::PriceFile {
        path: path.to_path_buf(),
        source,
    })?;
    for row in reader.deserialize::<PriceRow>() {
        let row = row?;
        bars.push(Bar {
            instrument_id: row.ticker,
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        });
    }
    Ok(())
}

/// Keeps instruments whose bar dates span at least `min_tenure_years`
/// calendar years (max year minus min year, matching the original screen).
fn filter_by_tenure(bars: Vec<Bar>, min_tenure_years: i32) -> Result<Vec<Bar>, LoaderError> {
    let mut spans: HashMap<String, (i32, i32)> = HashMap::new();
    for bar in &bars {
        let year = bar.date.year();
        spans
            .entry(bar.instrument_id.clone())
            .and_modify(|(min, max)| {
                *min = (*min).min(year);
                *max = (*max).max(year);
            })
            .or_insert((year, year));
    }

    let kept: Vec<Bar> = bars
        .into_iter()
        .filter(|bar| {
            let (min, max) = spans[&bar.instrument_id];
            max - min >= min_tenure_years
        })
        .collect();

    if kept.is_empty() {
        return Err(LoaderError::EmptyUniverse(min_tenure_years));
    }
    Ok(kept)
}
