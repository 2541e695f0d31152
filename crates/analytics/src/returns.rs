use crate::error::AnalyticsError;
use chrono::Months;
use core_types::{BarStore, ForwardReturnRecord};
use rust_decimal::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Fixed trading-days-per-month approximation used to map a return period in
/// months onto a row offset within each instrument's daily series.
pub const TRADING_DAYS_PER_MONTH: usize = 21;

/// The largest supported return period. Horizons beyond this are rejected
/// with `AnalyticsError::InvalidHorizon`.
pub const MAX_RETURN_PERIOD_MONTHS: u32 = 15;

/// Joins every bar with the close price `horizon_months * 21` trading rows
/// ahead and the percentage return to it.
///
/// The shift is computed strictly per instrument: each partition keeps its
/// native chronological order and a bar's `future_close` comes from the same
/// partition's row at `i + horizon_days`, or is `None` past the tail.
/// Shifting across instrument boundaries would silently pair one ticker's
/// close with another's future price, so the partitioned store is the input
/// here rather than a flat bar list.
pub fn compute_forward_returns(
    store: &BarStore,
    horizon_months: u32,
) -> Result<Vec<ForwardReturnRecord>, AnalyticsError> {
    if horizon_months == 0 || horizon_months > MAX_RETURN_PERIOD_MONTHS {
        return Err(AnalyticsError::InvalidHorizon(horizon_months));
    }
    let horizon_days = horizon_months as usize * TRADING_DAYS_PER_MONTH;

    let mut records = Vec::with_capacity(store.bar_count());
    for (instrument_id, series) in store.iter() {
        for (i, bar) in series.iter().enumerate() {
            let future_close = series.get(i + horizon_days).map(|b| b.close);
            let return_pct = future_close.map(|future| {
                let close = bar.close.to_f64().unwrap_or(0.0);
                let future = future.to_f64().unwrap_or(0.0);
                100.0 * (future - close) / close
            });
            records.push(ForwardReturnRecord {
                instrument_id: instrument_id.to_string(),
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                future_close,
                return_pct,
            });
        }
    }

    debug!(
        horizon_days,
        records = records.len(),
        "computed forward returns"
    );
    Ok(records)
}

/// Restricts forward-return records to each instrument's trailing
/// `time_range_months` window.
///
/// The cutoff is relative to that instrument's own most recent bar date, not
/// a single global date: two instruments whose coverage ends on different
/// days get different absolute cutoffs for the same window length. Callers
/// are responsible for ensuring the window is at least twice the return
/// period; this function filters by the literal value given.
pub fn filter_window(
    records: &[ForwardReturnRecord],
    time_range_months: u32,
) -> Vec<ForwardReturnRecord> {
    let mut latest: HashMap<&str, chrono::NaiveDate> = HashMap::new();
    for record in records {
        latest
            .entry(record.instrument_id.as_str())
            .and_modify(|d| *d = (*d).max(record.date))
            .or_insert(record.date);
    }

    let filtered: Vec<ForwardReturnRecord> = records
        .iter()
        .filter(|record| {
            let last = latest[record.instrument_id.as_str()];
            match last.checked_sub_months(Months::new(time_range_months)) {
                Some(cutoff) => record.date >= cutoff,
                // Date arithmetic underflow: the window covers everything.
                None => true,
            }
        })
        .cloned()
        .collect();

    debug!(
        time_range_months,
        kept = filtered.len(),
        of = records.len(),
        "applied trailing window"
    );
    filtered
}
