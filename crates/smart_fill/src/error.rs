//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! rejected inputs, regions too small to hold a single template, and failures reported by the
//! shape host.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "region {width}x{height} is too small; at least {required} is needed in both axes"
    )]
    RegionTooSmall {
        width: f32,
        height: f32,
        required: f32,
    },

    #[error("shape host error: {0}")]
    Host(String),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by a [`crate::host::ShapeHost`] call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<HostError> for Error {
    fn from(value: HostError) -> Self {
        Error::Host(value.message)
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
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn host_error_converts_to_host_variant() {
        let err: Error = HostError::new("region handle is stale").into();
        assert!(matches!(err, Error::Host(ref msg) if msg == "region handle is stale"));
    }

    #[test]
    fn region_too_small_message_names_dimensions() {
        let err = Error::RegionTooSmall {
            width: 10.0,
            height: 4.0,
            required: 20.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("10x4"));
        assert!(msg.contains("20"));
    }
}
