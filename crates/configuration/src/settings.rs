use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSettings,
    pub universe: UniverseSettings,
}

/// Describes where the raw per-year price files live and which years to load.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Directory containing the `{year}_stock_data.csv` files.
    pub directory: PathBuf,
    /// First year of price files to load (inclusive).
    pub start_year: i32,
    /// Last year of price files to load (inclusive).
    pub end_year: i32,
    /// Path to the reference catalog CSV (symbol, security name, GICS sector).
    pub catalog_path: PathBuf,
}

/// Parameters controlling which instruments enter the analysis universe.
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseSettings {
    /// Minimum span, in calendar years, an instrument's bar history must
    /// cover to be retained (the original screen keeps >= 10 years).
    pub min_tenure_years: i32,
}
