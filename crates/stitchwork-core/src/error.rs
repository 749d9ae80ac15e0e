use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StitchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown body part: {0}")]
    UnknownPart(String),
}

pub type Result<T> = std::result::Result<T, StitchError>;
