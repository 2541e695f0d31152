use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read price file {path}: {source}")]
    PriceFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No instrument satisfies the minimum tenure of {0} years")]
    EmptyUniverse(i32),
}
