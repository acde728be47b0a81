use thiserror::Error;

use crate::protocol::ClientHints;

/// Flat classification of every failure a decode call can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    NotFound,
    MalformedCookieHeader,
    InvalidBase64,
    InvalidFormat,
    IntegerOverflow,
    LengthTooLarge,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty input parameters: {reason}")]
    EmptyInput { reason: &'static str },

    #[error("cookie '{name}' not found")]
    NotFound { name: String },

    #[error("failed to parse cookie: {source}")]
    MalformedCookieHeader {
        #[from]
        source: cookie::ParseError,
    },

    #[error("invalid cookie syntax: {reason}")]
    InvalidCookieSyntax { reason: String },

    #[error("failed to decode base64: {source}")]
    InvalidBase64 {
        #[from]
        source: base64::DecodeError,
    },

    #[error("invalid payload: {source}")]
    Payload {
        #[from]
        source: PartialDecode,
    },
}

impl DecodeError {
    pub fn empty_input(reason: &'static str) -> Self {
        Self::EmptyInput { reason }
    }

    pub fn invalid_cookie_syntax<S: ToString>(str: S) -> Self {
        Self::InvalidCookieSyntax { reason: str.to_string() }
    }

    pub fn not_found<S: ToString>(name: S) -> Self {
        Self::NotFound { name: name.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MalformedCookieHeader { .. } | Self::InvalidCookieSyntax { .. } => ErrorKind::MalformedCookieHeader,
            Self::InvalidBase64 { .. } => ErrorKind::InvalidBase64,
            Self::Payload { source } => source.kind(),
        }
    }

    /// The hints decoded before the payload turned out to be malformed.
    ///
    /// Only payload errors carry a partial result; a present error always means the
    /// mapping must not be trusted as complete.
    pub fn partial(&self) -> Option<&ClientHints> {
        match self {
            Self::Payload { source } => Some(source.partial()),
            _ => None,
        }
    }

    pub fn into_partial(self) -> Option<ClientHints> {
        match self {
            Self::Payload { source } => Some(source.into_partial()),
            _ => None,
        }
    }
}

/// Violations of the `key.length.value` record grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid format: {reason}")]
    InvalidFormat { reason: String },

    #[error("integer overflow in length parsing")]
    IntegerOverflow,

    #[error("length too large, current: {length} exceed the limit {max_length}")]
    LengthTooLarge { length: usize, max_length: usize },
}

impl ParseError {
    pub fn invalid_format<S: ToString>(str: S) -> Self {
        Self::InvalidFormat { reason: str.to_string() }
    }

    pub fn length_too_large(length: usize, max_length: usize) -> Self {
        Self::LengthTooLarge { length, max_length }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::IntegerOverflow => ErrorKind::IntegerOverflow,
            Self::LengthTooLarge { .. } => ErrorKind::LengthTooLarge,
        }
    }
}

/// A [`ParseError`] paired with every hint decoded before the failing record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source}")]
pub struct PartialDecode {
    partial: ClientHints,
    source: ParseError,
}

impl PartialDecode {
    pub fn new(partial: ClientHints, source: ParseError) -> Self {
        Self { partial, source }
    }

    pub fn partial(&self) -> &ClientHints {
        &self.partial
    }

    pub fn into_partial(self) -> ClientHints {
        self.partial
    }

    pub fn error(&self) -> &ParseError {
        &self.source
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("invalid header name '{name}': {source}")]
    InvalidName { name: String, source: http::header::InvalidHeaderName },

    #[error("invalid value for header '{name}': {source}")]
    InvalidValue { name: String, source: http::header::InvalidHeaderValue },
}

impl HeaderError {
    pub fn invalid_name<S: ToString>(name: S, source: http::header::InvalidHeaderName) -> Self {
        Self::InvalidName { name: name.to_string(), source }
    }

    pub fn invalid_value<S: ToString>(name: S, source: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidValue { name: name.to_string(), source }
    }
}
