use core_types::{ForwardReturnRecord, IndustryStat, InstrumentStat};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Reduces the filtered forward-return records to per-instrument mean and
/// sample standard deviation.
///
/// Rows with a null `return_pct` are dropped before aggregating, so an
/// instrument whose entire window falls inside the horizon tail yields no
/// entry at all. An instrument with exactly one retained row has an undefined
/// sample deviation and gets `std_return = None`; downstream quantile and
/// tier logic excludes it.
pub fn aggregate(records: &[ForwardReturnRecord]) -> Vec<InstrumentStat> {
    let mut by_instrument: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(ret) = record.return_pct {
            by_instrument
                .entry(record.instrument_id.as_str())
                .or_default()
                .push(ret);
        }
    }

    let stats: Vec<InstrumentStat> = by_instrument
        .into_iter()
        .map(|(instrument_id, returns)| {
            let mean = returns.iter().sum::<f64>() / returns.len() as f64;
            let std = sample_std(&returns, mean);
            InstrumentStat {
                instrument_id: instrument_id.to_string(),
                mean_return: mean,
                std_return: std,
            }
        })
        .collect();

    debug!(instruments = stats.len(), "aggregated instrument stats");
    stats
}

/// Sample standard deviation with the N-1 denominator; undefined below two
/// observations.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Groups instrument stats by industry and averages them per group.
///
/// Instruments missing from the map are dropped, not errored. Instruments
/// with an undefined deviation still contribute their mean return; an
/// industry where no member has a defined deviation is omitted entirely.
/// Output is ordered by mean return descending, deviation ascending.
pub fn aggregate_by_industry(
    stats: &[InstrumentStat],
    instrument_to_industry: &HashMap<String, String>,
) -> Vec<IndustryStat> {
    let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for stat in stats {
        let Some(industry) = instrument_to_industry.get(&stat.instrument_id) else {
            continue;
        };
        let (means, stds) = groups.entry(industry.as_str()).or_default();
        means.push(stat.mean_return);
        if let Some(std) = stat.std_return {
            stds.push(std);
        }
    }

    let mut industries: Vec<IndustryStat> = groups
        .into_iter()
        .filter(|(_, (_, stds))| !stds.is_empty())
        .map(|(industry, (means, stds))| IndustryStat {
            industry: industry.to_string(),
            mean_return: means.iter().sum::<f64>() / means.len() as f64,
            mean_std: stds.iter().sum::<f64>() / stds.len() as f64,
        })
        .collect();

    industries.sort_by(|a, b| {
        b.mean_return
            .total_cmp(&a.mean_return)
            .then(a.mean_std.total_cmp(&b.mean_std))
    });

    debug!(industries = industries.len(), "aggregated industry stats");
    industries
}
