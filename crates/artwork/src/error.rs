//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover missing inputs, asset read/decode failures, compositing failures
//! re-raised from a subtree, invalid placement scales, coordinate overflow, oversized
//! canvases, tree depth limits, catalog lookups, IO, and generic errors.
use std::path::PathBuf;

use glam::IVec2;
use thiserror::Error;

use crate::attribute::{Attribute, KindId};

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("failed to read asset '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode asset '{}'", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to composite subtree of '{}'", path.display())]
    Composite {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to composite piece {id}")]
    Piece {
        id: u64,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid scale ({x}, {y}): factors must both be zero or both be positive")]
    InvalidScale { x: f64, y: f64 },

    #[error("placing a region at {coords} leaves the i32 coordinate range")]
    PlacementOverflow { coords: IVec2 },

    #[error("canvas of {width}x{height} exceeds the configured maximum extent of {max_extent}")]
    CanvasTooLarge {
        width: i64,
        height: i64,
        max_extent: u32,
    },

    #[error("asset tree deeper than the configured maximum of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("unknown kind '{kind}'")]
    UnknownKind { kind: KindId },

    #[error("attribute '{attribute}' of kind '{kind}' has no asset path")]
    UnknownAttribute { kind: KindId, attribute: Attribute },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Error::MissingInput(what.into())
    }

    pub(crate) fn composite(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Composite {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Returns `true` for the missing-input class of failures.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Error::MissingInput(_))
    }

    /// Follows [`Error::Composite`] and [`Error::Piece`] wrappers down to the failure that
    /// started them.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Composite { source, .. } | Error::Piece { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn root_cause_unwraps_nested_composites() {
        let leaf = Error::missing("asset image is not loaded");
        let err = Error::composite("a.png", Error::composite("b.png", leaf));
        assert!(err.root_cause().is_missing_input());
        assert!(!err.is_missing_input());
    }

    #[test]
    fn overflow_messages_name_the_limits() {
        let err = Error::PlacementOverflow {
            coords: IVec2::new(i32::MAX - 1, 0),
        };
        assert!(err.to_string().contains("2147483646"));

        let err = Error::CanvasTooLarge {
            width: 20_000,
            height: 4,
            max_extent: 16_384,
        };
        assert_eq!(
            err.to_string(),
            "canvas of 20000x4 exceeds the configured maximum extent of 16384"
        );
    }

    #[test]
    fn composite_message_names_path() {
        let err = Error::composite("layers/hat.png", Error::missing("x"));
        assert_eq!(
            err.to_string(),
            "failed to composite subtree of 'layers/hat.png'"
        );
    }
}
