use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("mount target not found: {0}")]
    TargetNotFound(String),

    #[error("unknown scene node: {0}")]
    UnknownNode(usize),

    #[error("chart has not been created yet")]
    NotCreated,
}
