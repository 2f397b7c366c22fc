use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    #[error("{role}: {kind} request {request} exceeds limit {limit}")]
    ResourceOrdering {
        role: String,
        kind: String,
        request: String,
        limit: String,
    },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
