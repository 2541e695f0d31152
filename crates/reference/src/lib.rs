//! # Instrument Reference Catalog
//!
//! The catalog maps instrument symbols to their security name and GICS
//! sector. The live system scrapes this from the S&P 500 constituents table;
//! here it is a CSV snapshot loaded once at startup. Lookups for unknown
//! symbols resolve to `None`, never an error.

use crate::error::ReferenceError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub mod error;

/// One row of the catalog CSV.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Security")]
    security: String,
    #[serde(rename = "GICS Sector")]
    sector: String,
}

/// The loaded reference catalog: symbol → security name / sector maps.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    securities: HashMap<String, String>,
    industries: HashMap<String, String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|source| ReferenceError::CatalogFile {
                path: path.to_path_buf(),
                source,
            })?;

        let mut securities = HashMap::new();
        let mut industries = HashMap::new();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row?;
            securities.insert(row.symbol.clone(), row.security);
            industries.insert(row.symbol, row.sector);
        }

        info!(instruments = securities.len(), "loaded reference catalog");
        Ok(Self {
            securities,
            industries,
        })
    }

    /// Builds a catalog directly from (symbol, security, sector) triples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut securities = HashMap::new();
        let mut industries = HashMap::new();
        for (symbol, security, sector) in entries {
            securities.insert(symbol.clone(), security);
            industries.insert(symbol, sector);
        }
        Self {
            securities,
            industries,
        }
    }

    /// The human-readable display name, `"{security} - {sector}"`, or `None`
    /// for an uncataloged symbol.
    pub fn display_name(&self, symbol: &str) -> Option<String> {
        let security = self.securities.get(symbol)?;
        let sector = self.industries.get(symbol)?;
        Some(format!("{security} - {sector}"))
    }

    /// The security name for a symbol, if cataloged.
    pub fn security(&self, symbol: &str) -> Option<&str> {
        self.securities.get(symbol).map(String::as_str)
    }

    /// The symbol→GICS-sector map used by the industry rollup.
    pub fn industry_map(&self) -> &HashMap<String, String> {
        &self.industries
    }
}
