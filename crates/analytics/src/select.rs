use crate::thresholds::Thresholds;
use core_types::{InstrumentStat, Tier};
use std::cmp::Ordering;
use tracing::debug;

/// Filters instruments to the requested return/volatility tiers and ranks
/// them with the tier-dependent comparator.
///
/// Filtering keeps instruments whose mean return falls in the return tier's
/// half-open interval AND whose deviation falls in the volatility tier's.
/// Instruments with an undefined deviation cannot be classified and are
/// skipped.
///
/// The sort order depends on the tiers, in this precedence:
/// - `return_tier == Low`: mean return ascending, deviation descending
///   (least-bad losers first; among equal returns the wilder series leads);
/// - else `volatility_tier == High`: deviation descending, mean return
///   descending;
/// - otherwise: mean return descending, deviation ascending.
///
/// The sort is stable, so instruments with identical keys keep the
/// aggregator's document order.
pub fn select(
    stats: &[InstrumentStat],
    thresholds: &Thresholds,
    return_tier: Tier,
    volatility_tier: Tier,
) -> Vec<InstrumentStat> {
    let mut selected: Vec<InstrumentStat> = stats
        .iter()
        .filter(|stat| {
            let Some(std) = stat.std_return else {
                return false;
            };
            return_tier.contains(stat.mean_return, thresholds.p40_return, thresholds.p75_return)
                && volatility_tier.contains(std, thresholds.p40_std, thresholds.p75_std)
        })
        .cloned()
        .collect();

    selected.sort_by(comparator(return_tier, volatility_tier));

    debug!(
        ?return_tier,
        ?volatility_tier,
        selected = selected.len(),
        "selected and ranked instruments"
    );
    selected
}

/// The tier-dependent total order. The Low-return branch takes precedence
/// over the High-volatility branch; the combination of both reuses the
/// Low-return order.
fn comparator(
    return_tier: Tier,
    volatility_tier: Tier,
) -> impl Fn(&InstrumentStat, &InstrumentStat) -> Ordering {
    move |a, b| {
        let (a_std, b_std) = (deviation(a), deviation(b));
        if return_tier == Tier::Low {
            a.mean_return
                .total_cmp(&b.mean_return)
                .then(b_std.total_cmp(&a_std))
        } else if volatility_tier == Tier::High {
            b_std
                .total_cmp(&a_std)
                .then(b.mean_return.total_cmp(&a.mean_return))
        } else {
            b.mean_return
                .total_cmp(&a.mean_return)
                .then(a_std.total_cmp(&b_std))
        }
    }
}

// Selection has already dropped undefined deviations; NAN here only pads the
// comparator's totality.
fn deviation(stat: &InstrumentStat) -> f64 {
    stat.std_return.unwrap_or(f64::NAN)
}
