//! 翻译过程中的致命错误。库只返回错误值，进程退出码由二进制入口决定。
use std::io;

use thiserror::Error;

use crate::net::ids::TransitionId;
use crate::net::io::IoError;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("duplicate name: {name}")]
    DuplicateName { name: String },
    #[error("unknown arc: {from} -> {to}")]
    UnresolvedArcEndpoint { from: String, to: String },
    #[error("unterminated quoted name: {text}")]
    UnterminatedName { text: String },
    #[error("invalid HSN label place name {name} (transition {transition})")]
    InvalidLabelPlaceName {
        transition: TransitionId,
        name: String,
    },
    #[error("invalid HSN label place type {tag} (transition {transition})")]
    InvalidLabelPlaceType {
        transition: TransitionId,
        tag: String,
    },
    #[error("not enough memory ({table})")]
    ResourceExhausted { table: &'static str },
    #[error("error open file {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("error writing model dump {path}")]
    Dump {
        path: String,
        #[source]
        source: IoError,
    },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<TranslateError>,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl TranslateError {
    /// Maps a failed reservation on `table` to [`TranslateError::ResourceExhausted`].
    pub fn exhausted<E>(table: &'static str) -> impl FnOnce(E) -> Self {
        move |_| TranslateError::ResourceExhausted { table }
    }

    pub fn at_line(self, line: usize) -> Self {
        match self {
            TranslateError::AtLine { .. } => self,
            other => TranslateError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any line context peeled off.
    pub fn root(&self) -> &TranslateError {
        match self {
            TranslateError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TranslateError::DuplicateName { .. }
            | TranslateError::UnresolvedArcEndpoint { .. }
            | TranslateError::UnterminatedName { .. }
            | TranslateError::Open { .. }
            | TranslateError::Dump { .. }
            | TranslateError::Io(_) => 2,
            TranslateError::InvalidLabelPlaceName { .. }
            | TranslateError::InvalidLabelPlaceType { .. }
            | TranslateError::ResourceExhausted { .. } => 3,
            TranslateError::AtLine { source, .. } => source.exit_code(),
        }
    }
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_context_keeps_exit_code() {
        let err = TranslateError::DuplicateName {
            name: "p1".to_owned(),
        }
        .at_line(4)
        .at_line(9);
        assert_eq!(err.to_string(), "line 4: duplicate name: p1");
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err.root(), TranslateError::DuplicateName { name } if name == "p1"));
    }

    #[test]
    fn label_errors_exit_with_three() {
        let err = TranslateError::InvalidLabelPlaceType {
            transition: TransitionId::new(0),
            tag: "x".to_owned(),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "invalid HSN label place type x (transition 1)"
        );
    }
}
