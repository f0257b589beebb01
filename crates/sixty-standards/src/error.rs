#![deny(unsafe_code)]

use std::path::PathBuf;

use sixty_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML profile {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {name}: {message}")]
    Csv { name: String, message: String },

    #[error("invalid profile '{id}': {message}")]
    InvalidProfile { id: String, message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(name: &str, source: &csv::Error) -> Self {
        Self::Csv {
            name: name.to_string(),
            message: source.to_string(),
        }
    }

    pub(crate) fn invalid(id: &str, message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            id: id.to_string(),
            message: message.into(),
        }
    }
}
