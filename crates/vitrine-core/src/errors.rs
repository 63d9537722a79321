use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("dataset load failed: {0}")]
    Load(String),
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
