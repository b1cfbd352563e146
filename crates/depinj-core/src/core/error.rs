use thiserror::Error;

pub type DepinjResult<T> = Result<T, DepinjError>;

#[derive(Error, Debug)]
pub enum DepinjError {
    /// A construction promise was read before its fixture factory ran.
    #[error("Nothing constructed yet for {0}")]
    NotConstructed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
