use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read catalog file {path}: {source}")]
    CatalogFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
