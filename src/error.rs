use crate::patch::Anchor;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("anchor {0} not found in document")]
    MissingAnchor(Anchor),
    #[error("config error: {0}")]
    Config(String),
    #[error("git output is not valid utf-8")]
    GitOutput(#[source] std::string::FromUtf8Error),
}

impl PatchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
