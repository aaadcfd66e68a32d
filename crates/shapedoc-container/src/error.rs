use thiserror::Error;

/// Failures of label and attribute primitives
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container has been closed")]
    Closed,

    #[error("label is missing or has a malformed `{0}` entry")]
    MalformedLabel(&'static str),

    #[error("automerge: {0}")]
    Automerge(#[from] automerge::AutomergeError),
}

pub type ContainerResult<T> = Result<T, ContainerError>;
