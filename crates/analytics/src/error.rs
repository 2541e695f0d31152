use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid return period: {0} months (supported range is 1-15)")]
    InvalidHorizon(u32),

    #[error("Invalid time range: {0} months (must be positive)")]
    InvalidWindow(u32),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),
}
