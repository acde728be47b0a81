use std::collections::HashMap;
use std::collections::hash_map;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Request};

use crate::protocol::HeaderError;

/// Header name to value mapping produced by decoding a length-bin payload.
///
/// Names are canonical `Sec-CH-UA-*` header names when the short key is known and
/// the raw short key otherwise. Values are the record bytes taken verbatim; they
/// share the decoded buffer instead of being copied.
///
/// Inserting a name that is already present replaces its value, so the last record
/// for a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientHints {
    headers: HashMap<String, Bytes>,
}

impl ClientHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.headers.get(name)
    }

    /// Returns the value as `&str`, or `None` if it is absent or not valid UTF-8.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| std::str::from_utf8(value).ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Stores `value` under `name`, returning the value it replaced.
    pub fn insert<N: Into<String>, V: Into<Bytes>>(&mut self, name: N, value: V) -> Option<Bytes> {
        self.headers.insert(name.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_inner(self) -> HashMap<String, Bytes> {
        self.headers
    }

    /// Copies every hint onto `headers`, replacing any value already set for that name.
    ///
    /// All entries are validated before the map is touched, so on error `headers` is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError`] if a name is not a valid header name or a value contains
    /// bytes not allowed in a header value.
    pub fn write_headers(&self, headers: &mut HeaderMap) -> Result<(), HeaderError> {
        let mut converted = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| HeaderError::invalid_name(name, e))?;
            let header_value = HeaderValue::from_maybe_shared(value.clone()).map_err(|e| HeaderError::invalid_value(name, e))?;
            converted.push((header_name, header_value));
        }

        headers.reserve(converted.len());
        for (name, value) in converted {
            headers.insert(name, value);
        }
        Ok(())
    }

    /// Copies every hint onto the request headers, see [`ClientHints::write_headers`].
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError`] if a hint can't be represented as an HTTP header.
    pub fn apply_to_request<B>(&self, request: &mut Request<B>) -> Result<(), HeaderError> {
        self.write_headers(request.headers_mut())
    }
}

impl IntoIterator for ClientHints {
    type Item = (String, Bytes);
    type IntoIter = hash_map::IntoIter<String, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl<N: Into<String>, V: Into<Bytes>> FromIterator<(N, V)> for ClientHints {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut hints = Self::new();
        for (name, value) in iter {
            hints.insert(name, value);
        }
        hints
    }
}
