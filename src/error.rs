use std::path::PathBuf;

use shapedoc_container::{ContainerError, ReaderStatus, StoreStatus};
use thiserror::Error;

/// Failures of the attribute codec
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("label {label} has no {attribute} attribute")]
    AttributeMissing { attribute: &'static str, label: String },

    #[error("text array must hold at least one value")]
    EmptyArray,

    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Errors raised by the document model and document I/O
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot save document: {missing} has not been set")]
    PreconditionFailed { missing: &'static str },

    #[error("failed to open container {}: {status}", .path.display())]
    ContainerOpenFailure { path: PathBuf, status: ReaderStatus },

    #[error("could not create a {format} document")]
    DocumentCreateFailure { format: String },

    #[error("failed to store container {}: {status}", .path.display())]
    StoreFailure { path: PathBuf, status: StoreStatus },

    #[error("corrupt document: {detail}")]
    CorruptDocument { detail: String },

    #[error("no shape collection named {0:?}")]
    UnknownCollection(String),

    #[error("root shape has not been set")]
    RootShapeUnset,

    #[error("document UUID has not been set")]
    UuidUnset,

    #[error("archive path {} must not have an extension", .0.display())]
    InvalidArchivePath(PathBuf),

    #[error("attribute codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a config failure
#[derive(Debug, Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn corrupt(detail: impl Into<String>) -> Self {
        Error::CorruptDocument { detail: detail.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
