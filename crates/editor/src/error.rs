//! Error taxonomy of the editing session.

use linepad_buffer::BufferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// The theme has no colors for the language being edited.
    #[error("no theme colors for language '{language}'")]
    ThemeUnavailable { language: String },

    /// An edit addressed a row or column outside the buffer.
    #[error("cannot edit at {row}:{column}")]
    InvalidMutationTarget { row: usize, column: usize },

    #[error("not an editor command: '{0}'")]
    UnrecognizedCommand(String),

    /// A file or directory name with characters paths cannot hold.
    #[error("invalid name: '{0}'")]
    InvalidName(String),

    /// The file service or project tree rejected an operation.
    #[error("{operation} failed")]
    CollaboratorFailure {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl EditorError {
    pub(crate) fn collaborator(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| EditorError::CollaboratorFailure { operation, source }
    }
}

impl From<BufferError> for EditorError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::ThemeUnavailable { language } => EditorError::ThemeUnavailable { language },
            BufferError::OutOfBounds { row, column } => {
                EditorError::InvalidMutationTarget { row, column }
            }
        }
    }
}
