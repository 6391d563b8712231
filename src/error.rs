//! Error types for domwalk operations.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised by the document layer.
///
/// The walks themselves never produce errors of their own; they hand back
/// whatever their node type's link reads fail with.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("no element with id {0:?}")]
    MissingElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;
