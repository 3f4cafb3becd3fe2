use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookstoreError {
    #[error("Invalid value '{value}' for field '{field}'")]
    Validation { field: &'static str, value: String },

    #[error("Book with id {0} not found")]
    NotFound(u64),

    #[error("Failed to {context} (file: {}): {message}", .path.display())]
    Persistence {
        context: String,
        path: PathBuf,
        message: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BookstoreError {
    pub fn validation(field: &'static str, value: impl ToString) -> Self {
        Self::Validation {
            field,
            value: value.to_string(),
        }
    }

    pub fn persistence(
        context: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::Persistence {
            context: context.into(),
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookstoreError>;
