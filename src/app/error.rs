use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Source {0} was already populated")]
    SlotAlreadyWritten(usize),

    #[error("Source not found: {0}")]
    SourceNotFound(usize),

    #[error("Fetch task aborted: {0}")]
    FetchAborted(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
