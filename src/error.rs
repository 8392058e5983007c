use std::error::Error as StdError;

use thiserror::Error;

use crate::geom::GeometryError;

pub type ParseResult<T> = Result<T, ParseError>;

/// Malformed input met by either reader.
///
/// Every failure raised while decoding, whatever its cause, surfaces as this one kind.
#[derive(Debug, Error)]
#[error("malformed input: {message}")]
pub struct ParseError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// Build an "expected X but found Y" failure.
    pub fn expected(expected: impl AsRef<str>, found: impl AsRef<str>) -> Self {
        Self::new(format!("expected {} but found {}", expected.as_ref(), found.as_ref()))
    }

    /// Append where in the input the failure happened.
    pub(crate) fn located(mut self, location: impl std::fmt::Display) -> Self {
        self.message = format!("{} ({location})", self.message);
        self
    }

    /// Description of what went wrong.
    #[inline] pub fn message(&self) -> &str { &self.message }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        let message = match e.kind() {
            std::io::ErrorKind::UnexpectedEof => "unexpected end of input".to_string(),
            _ => format!("read failed: {e}"),
        };
        Self { message, source: Some(Box::new(e)) }
    }
}

impl From<GeometryError> for ParseError {
    fn from(e: GeometryError) -> Self {
        Self { message: e.to_string(), source: Some(Box::new(e)) }
    }
}

impl From<hex::FromHexError> for ParseError {
    fn from(e: hex::FromHexError) -> Self {
        Self { message: format!("invalid hex: {e}"), source: Some(Box::new(e)) }
    }
}

/// A builder was asked for a combination of settings that cannot hold together.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SRID output requires extended WKB flags and cannot be combined with strict ISO type codes")]
    SridWithStrict,
}
