use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("campaign type is required")]
    EmptyCampaignType,
    #[error("invalid time of day: {0}")]
    InvalidTimeOfDay(String),
    #[error("invalid timestamp")]
    InvalidTimestamp,
}
