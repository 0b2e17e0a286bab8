use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ObjError>;

#[derive(Debug, Error)]
pub enum ObjError {
    /// The document breaks the grammar or references data it never declared.
    /// `line` counts recognized records only; 0 means the whole document.
    #[error("Error parsing OBJ file on line: {line}. {message}")]
    Format { line: usize, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("I/O failure: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl ObjError {
    pub fn format<S: Into<String>>(line: usize, message: S) -> Self {
        ObjError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        ObjError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn io<S: Into<String>>(message: S, source: io::Error) -> Self {
        ObjError::Io {
            message: message.into(),
            source,
        }
    }

    /// Line number of a format error, `None` for the other kinds.
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ObjError::Format { message, .. }
            | ObjError::InvalidArgument { message }
            | ObjError::Io { message, .. } => message,
        }
    }
}
