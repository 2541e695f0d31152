use analytics::{TRADING_DAYS_PER_MONTH, compute_forward_returns};
use chrono::{Duration, NaiveDate};
use core_types::{Bar, BarStore};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + Duration::days(offset)
}

fn bar(id: &str, offset: i64, close: f64) -> Bar {
    let price = Decimal::try_from(close).unwrap();
    Bar {
        instrument_id: id.to_string(),
        date: day(offset),
        open: price,
        high: price,
        low: price,
        close: price,
    }
}

fn series(id: &str, closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| bar(id, i as i64, c))
        .collect()
}

#[test]
fn future_close_is_the_close_horizon_days_ahead() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let store = BarStore::from_bars(series("AAA", &closes));

    let records = compute_forward_returns(&store, 1).unwrap();
    assert_eq!(records.len(), 60);

    for (i, record) in records.iter().enumerate() {
        match record.future_close {
            Some(future) => {
                assert_eq!(future.to_f64().unwrap(), closes[i + TRADING_DAYS_PER_MONTH]);
            }
            None => assert!(i + TRADING_DAYS_PER_MONTH >= closes.len()),
        }
    }
}

#[test]
fn a_250_bar_series_with_one_month_horizon_has_21_null_tail_rows() {
    let closes: Vec<f64> = (0..250).map(|i| 50.0 + (i % 7) as f64).collect();
    let store = BarStore::from_bars(series("AAA", &closes));

    let records = compute_forward_returns(&store, 1).unwrap();
    let non_null = records.iter().filter(|r| r.return_pct.is_some()).count();
    let null = records.iter().filter(|r| r.return_pct.is_none()).count();

    assert_eq!(non_null, 229);
    assert_eq!(null, 21);
    // The nulls are exactly the trailing rows.
    assert!(records[229..].iter().all(|r| r.future_close.is_none()));
}

#[test]
fn return_pct_is_in_percentage_units() {
    // 22 bars at 100, so row 0 sees the close 21 rows ahead.
    let mut closes = vec![100.0; 22];
    closes[21] = 110.0;
    let store = BarStore::from_bars(series("AAA", &closes));

    let records = compute_forward_returns(&store, 1).unwrap();
    let first = records[0].return_pct.unwrap();
    assert!((first - 10.0).abs() < 1e-9, "expected 10.0, got {first}");
}

#[test]
fn return_pct_is_null_exactly_when_future_close_is() {
    let closes: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
    let store = BarStore::from_bars(series("AAA", &closes));

    for record in compute_forward_returns(&store, 1).unwrap() {
        assert_eq!(record.future_close.is_some(), record.return_pct.is_some());
    }
}

#[test]
fn shifting_never_crosses_instrument_boundaries() {
    // Two instruments, each shorter than one horizon: every row must be null
    // even though the flat table has enough rows overall.
    let mut bars = series("AAA", &[100.0; 10]);
    bars.extend(series("BBB", &[999.0; 10]));
    let store = BarStore::from_bars(bars);

    let records = compute_forward_returns(&store, 1).unwrap();
    assert_eq!(records.len(), 20);
    assert!(records.iter().all(|r| r.future_close.is_none()));
}

#[test]
fn horizons_outside_the_supported_range_are_rejected() {
    let store = BarStore::from_bars(series("AAA", &[100.0; 5]));
    assert!(compute_forward_returns(&store, 0).is_err());
    assert!(compute_forward_returns(&store, 16).is_err());
    assert!(compute_forward_returns(&store, 15).is_ok());
}
