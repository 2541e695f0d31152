//! # Screener Engine
//!
//! The orchestration layer between the presentation surface and the pure
//! analytics core. A `ScreenerEngine` owns the immutable `BarStore`, the
//! reference catalog and a process-lifetime query cache, and exposes the four
//! query operations the UI consumes: candidate screening, single-instrument
//! history, industry performance and the scalar summary bundle.
//!
//! Every operation is deterministic and total: a tier/window combination
//! that matches nothing is an empty result, not an error, and unknown
//! instruments yield empty row sets and `None` names.

pub use crate::error::EngineError;
use analytics::{AnalyticsError, SummaryStats, Thresholds};
use core_types::{BarStore, ForwardReturnRecord, IndustryStat, InstrumentStat, Tier};
use query_cache::QueryCache;
use reference::Catalog;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub mod error;

/// How many top-ranked instruments get their windowed records returned for
/// charting alongside a candidate screen.
pub const TOP_CANDIDATES: usize = 5;

/// An instrument stat paired with its resolved display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedInstrument {
    /// `None` when the symbol is not in the reference catalog.
    pub name: Option<String>,
    pub stat: InstrumentStat,
}

/// The full result of a candidate screen: the ranked selection, the windowed
/// forward-return rows for the top instruments, their ids, and the market
/// mean return for context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateReport {
    pub ranked: Vec<RankedInstrument>,
    pub top_records: Vec<ForwardReturnRecord>,
    pub top_ids: Vec<String>,
    pub market_mean_return: f64,
}

/// The windowed forward-return table and its per-instrument aggregation for
/// one (time_range, return_period) pair. This is the shared intermediate
/// every query operation starts from, so it is what the cache holds.
#[derive(Debug, Clone)]
struct WindowedReturns {
    records: Vec<ForwardReturnRecord>,
    stats: Vec<InstrumentStat>,
}

pub struct ScreenerEngine {
    store: BarStore,
    catalog: Catalog,
    cache: QueryCache,
}

impl ScreenerEngine {
    pub fn new(store: BarStore, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            cache: QueryCache::new(),
        }
    }

    /// Screens the universe for instruments in the requested return and
    /// volatility tiers, ranked by the tier-dependent comparator.
    pub fn find_candidates(
        &self,
        time_range_months: u32,
        return_period_months: u32,
        return_tier: Tier,
        volatility_tier: Tier,
    ) -> Result<CandidateReport, EngineError> {
        let args = (
            time_range_months,
            return_period_months,
            return_tier,
            volatility_tier,
        );
        let report = self.cache.get_or_compute("find_candidates", &args, || {
            let windowed = self.windowed(time_range_months, return_period_months)?;

            let (thresholds, market_mean_return) = match self.tier_context(&windowed.stats) {
                Some(context) => context,
                // Nothing classifiable in this window: a valid empty screen.
                None => {
                    return Ok(CandidateReport {
                        ranked: Vec::new(),
                        top_records: Vec::new(),
                        top_ids: Vec::new(),
                        market_mean_return: 0.0,
                    });
                }
            };

            let selected =
                analytics::select(&windowed.stats, &thresholds, return_tier, volatility_tier);
            let top_ids: Vec<String> = selected
                .iter()
                .take(TOP_CANDIDATES)
                .map(|s| s.instrument_id.clone())
                .collect();
            let top_records: Vec<ForwardReturnRecord> = windowed
                .records
                .iter()
                .filter(|r| top_ids.iter().any(|id| *id == r.instrument_id))
                .cloned()
                .collect();
            let ranked: Vec<RankedInstrument> = selected
                .into_iter()
                .map(|stat| RankedInstrument {
                    name: self.catalog.display_name(&stat.instrument_id),
                    stat,
                })
                .collect();

            info!(
                time_range_months,
                return_period_months,
                %return_tier,
                %volatility_tier,
                candidates = ranked.len(),
                "candidate screen complete"
            );
            Ok::<_, EngineError>(CandidateReport {
                ranked,
                top_records,
                top_ids,
                market_mean_return,
            })
        })?;
        Ok((*report).clone())
    }

    /// The windowed forward-return rows for a single instrument. An unknown
    /// id yields an empty row set.
    pub fn query_instrument(
        &self,
        time_range_months: u32,
        return_period_months: u32,
        instrument_id: &str,
    ) -> Result<Vec<ForwardReturnRecord>, EngineError> {
        let windowed = self.windowed(time_range_months, return_period_months)?;
        Ok(windowed
            .records
            .iter()
            .filter(|r| r.instrument_id == instrument_id)
            .cloned()
            .collect())
    }

    /// Per-industry averages of the instrument stats, ranked by mean return
    /// descending with deviation ascending as the tie-break.
    pub fn industry_performance(
        &self,
        time_range_months: u32,
        return_period_months: u32,
    ) -> Result<Vec<IndustryStat>, EngineError> {
        let args = (time_range_months, return_period_months);
        let industries = self.cache.get_or_compute("industry_performance", &args, || {
            let windowed = self.windowed(time_range_months, return_period_months)?;
            Ok::<_, EngineError>(analytics::aggregate_by_industry(
                &windowed.stats,
                self.catalog.industry_map(),
            ))
        })?;
        Ok((*industries).clone())
    }

    /// The scalar summary bundle (mean / p40 / p75 of return and deviation)
    /// over a stat list.
    pub fn summary_statistics(
        &self,
        stats: &[InstrumentStat],
    ) -> Result<SummaryStats, EngineError> {
        Ok(analytics::compute_summary(stats)?)
    }

    /// The per-instrument stats for one (time_range, return_period) pair,
    /// for callers that feed `summary_statistics` directly.
    pub fn instrument_stats(
        &self,
        time_range_months: u32,
        return_period_months: u32,
    ) -> Result<Vec<InstrumentStat>, EngineError> {
        let windowed = self.windowed(time_range_months, return_period_months)?;
        Ok(windowed.stats.clone())
    }

    /// Cache hit/miss counters, exposed for observability.
    pub fn cache_counters(&self) -> (u64, u64) {
        (self.cache.hit_count(), self.cache.miss_count())
    }

    /// Computes (or fetches) the shared windowed table and aggregation for a
    /// (time_range, return_period) pair.
    fn windowed(
        &self,
        time_range_months: u32,
        return_period_months: u32,
    ) -> Result<Arc<WindowedReturns>, EngineError> {
        if time_range_months == 0 {
            return Err(AnalyticsError::InvalidWindow(time_range_months).into());
        }
        let args = (time_range_months, return_period_months);
        self.cache.get_or_compute("windowed_returns", &args, || {
            let forward =
                analytics::compute_forward_returns(&self.store, return_period_months)?;
            let records = analytics::filter_window(&forward, time_range_months);
            let stats = analytics::aggregate(&records);
            Ok::<_, EngineError>(WindowedReturns { records, stats })
        })
    }

    /// Thresholds plus market mean return, or `None` when no instrument in
    /// the window has a defined deviation.
    fn tier_context(&self, stats: &[InstrumentStat]) -> Option<(Thresholds, f64)> {
        let thresholds = analytics::compute_thresholds(stats).ok()?;
        let summary = analytics::compute_summary(stats).ok()?;
        Some((thresholds, summary.mean_return))
    }
}
