use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("source column key must not be empty")]
    EmptyColumnKey,
    #[error("target field name must not be empty")]
    EmptyFieldName,
    #[error("'{0}' is reserved for unmapped columns and cannot name a target field")]
    ReservedFieldName(String),
    #[error("alias entry for '{target}' has an empty alias")]
    EmptyAlias { target: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
