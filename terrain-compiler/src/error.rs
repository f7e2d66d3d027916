use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    /// A catalogue row that could not be decoded. `line` is 1-based and
    /// counts the header.
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("sentinel `{sentinel}` not found in {}", path.display())]
    MissingSentinel { sentinel: String, path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
