use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'completed' cannot be the default list: new reminders start incomplete")]
    InvalidDefaultList,

    #[error("invalid due date '{0}', expected dd/mm/yy HH:MM")]
    InvalidDate(String),

    #[error("unknown view '{0}' (expected reminders, today, scheduled, flagged or completed)")]
    UnknownView(String),

    #[error("unsupported shell '{0}'")]
    UnsupportedShell(String),
}

pub type Result<T> = std::result::Result<T, Error>;
