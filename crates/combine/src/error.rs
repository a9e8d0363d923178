use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombineError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed XML in {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },
    #[error("Unexpected root element <{found}> in {}, expected <{expected}>", path.display())]
    UnexpectedRoot {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },
    #[error("Compound {refid} listed in index but {} is missing", path.display())]
    MissingCompound { refid: String, path: PathBuf },
    #[error("Failed to write combined XML: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CombineError>;
