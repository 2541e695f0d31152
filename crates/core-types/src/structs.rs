use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single daily OHLC bar for one instrument.
///
/// Invariant (enforced by the loading layer, assumed here): for a given
/// instrument, dates are unique and the full history spans at least the
/// configured minimum tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub instrument_id: String,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// The immutable, in-memory table of daily bars, partitioned per instrument.
///
/// Built once at startup by the data loader and shared read-only by every
/// query. Partitions are keyed by instrument id in a `BTreeMap` so iteration
/// order (and therefore every downstream "document order") is deterministic,
/// and each partition is sorted chronologically at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarStore {
    partitions: BTreeMap<String, Vec<Bar>>,
}

impl BarStore {
    /// Builds a store from a flat bar list, grouping by instrument and
    /// sorting each partition by date.
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        let mut partitions: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
        for bar in bars {
            partitions.entry(bar.instrument_id.clone()).or_default().push(bar);
        }
        for series in partitions.values_mut() {
            series.sort_by_key(|b| b.date);
        }
        Self { partitions }
    }

    /// The number of distinct instruments in the store.
    pub fn instrument_count(&self) -> usize {
        self.partitions.len()
    }

    /// The total number of bars across all instruments.
    pub fn bar_count(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// The chronologically sorted bar series for one instrument, if present.
    pub fn series(&self, instrument_id: &str) -> Option<&[Bar]> {
        self.partitions.get(instrument_id).map(Vec::as_slice)
    }

    /// Iterates instrument partitions in deterministic (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Bar])> {
        self.partitions.iter().map(|(id, series)| (id.as_str(), series.as_slice()))
    }
}

/// One bar joined with the close price `horizon_days` trading rows ahead
/// within the same instrument's series, and the percentage return to it.
///
/// `future_close` is `None` at the tail of a series where no row exists that
/// far ahead; `return_pct` is `None` exactly when `future_close` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardReturnRecord {
    pub instrument_id: String,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub future_close: Option<Decimal>,
    pub return_pct: Option<f64>,
}

/// Per-instrument summary of windowed forward returns.
///
/// `std_return` is the sample standard deviation (N-1 denominator); it is
/// `None` when the instrument retained fewer than two observations, in which
/// case the instrument is excluded from quantile and tier computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentStat {
    pub instrument_id: String,
    pub mean_return: f64,
    pub std_return: Option<f64>,
}

/// Per-industry averages of the instrument-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryStat {
    pub industry: String,
    pub mean_return: f64,
    pub mean_std: f64,
}
