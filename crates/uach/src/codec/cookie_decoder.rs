//! Extraction of client hints from a raw `Cookie` request header.
//!
//! The header is parsed with the `cookie` crate: `;`-separated `name=value` pairs,
//! surrounding whitespace ignored, double-quoted values unwrapped. Names must be
//! RFC 6265 tokens and values must consist of `cookie-octet`s. The first cookie
//! whose name matches exactly is Base64-decoded and handed to a
//! [`LengthBinDecoder`].

use cookie::Cookie;
use tracing::debug;

use crate::codec::LengthBinDecoder;
use crate::ensure;
use crate::protocol::{ClientHints, DecodeError};

/// Name of the cookie the client-side UA-CH script writes by default.
pub const DEFAULT_COOKIE_NAME: &str = "wuach";

/// Decoder for client hints persisted in a named cookie.
///
/// ```
/// use uach_cookie::codec::CookieDecoder;
///
/// let decoder = CookieDecoder::new("wuach");
/// let hints = decoder.decode("foo=bar; wuach=bS4yLj8x").unwrap();
/// assert_eq!(hints.get_str("Sec-CH-UA-Mobile"), Some("?1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDecoder {
    name: String,
    decoder: LengthBinDecoder,
}

impl CookieDecoder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), decoder: LengthBinDecoder::new() }
    }

    /// Replaces the payload decoder, e.g. to change the record length limit.
    #[must_use]
    pub fn with_decoder(mut self, decoder: LengthBinDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finds this decoder's cookie in `cookie_header` and decodes its hints.
    ///
    /// # Errors
    ///
    /// See [`decode_cookie`].
    pub fn decode(&self, cookie_header: &str) -> Result<ClientHints, DecodeError> {
        decode_cookie(&self.decoder, &self.name, cookie_header)
    }
}

impl Default for CookieDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME)
    }
}

/// Finds the cookie named `cookie_name` in `cookie_header` and decodes its value.
///
/// The whole header is parsed before the lookup, so a malformed pair anywhere in
/// the header fails the call. When the name appears more than once the first
/// occurrence is used.
///
/// # Errors
///
/// - [`DecodeError::EmptyInput`] if `cookie_name`, `cookie_header` or the cookie value is empty
/// - [`DecodeError::MalformedCookieHeader`] if `cookie_header` is not valid cookie syntax
/// - [`DecodeError::InvalidCookieSyntax`] if a cookie name is not a token or a value holds a
///   character outside the cookie-octet set
/// - [`DecodeError::NotFound`] if no cookie is named `cookie_name`
/// - [`DecodeError::InvalidBase64`] if the cookie value is not valid Base64
/// - [`DecodeError::Payload`] if the decoded payload is malformed, with the partial hints
pub fn decode_cookie(decoder: &LengthBinDecoder, cookie_name: &str, cookie_header: &str) -> Result<ClientHints, DecodeError> {
    ensure!(!cookie_name.is_empty(), DecodeError::empty_input("cookie name cannot be empty"));
    ensure!(!cookie_header.is_empty(), DecodeError::empty_input("cookie data cannot be empty"));

    let cookies = Cookie::split_parse(cookie_header).collect::<Result<Vec<_>, _>>()?;
    for cookie in &cookies {
        validate_cookie(cookie)?;
    }

    let Some(cookie) = cookies.iter().find(|cookie| cookie.name() == cookie_name) else {
        debug!(cookie_name, cookies = cookies.len(), "client hints cookie not found");
        return Err(DecodeError::not_found(cookie_name));
    };

    debug!(cookie_name, value_len = cookie.value_trimmed().len(), "found client hints cookie");
    decoder.decode_base64(cookie.value_trimmed())
}

/// Checks a parsed pair against the RFC 6265 `cookie-pair` grammar.
fn validate_cookie(cookie: &Cookie<'_>) -> Result<(), DecodeError> {
    let name = cookie.name();
    ensure!(
        name.bytes().all(is_token_byte),
        DecodeError::invalid_cookie_syntax(format!("invalid cookie name '{name}'"))
    );
    ensure!(
        cookie.value_trimmed().bytes().all(is_cookie_octet),
        DecodeError::invalid_cookie_syntax(format!("invalid value for cookie '{name}'"))
    );
    Ok(())
}

/// `tchar` from RFC 9110 section 5.6.2.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// `cookie-octet` from RFC 6265 section 4.1.1: visible ASCII except `"`, `,`, `;` and `\`.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2b | 0x2d..=0x3a | 0x3c..=0x5b | 0x5d..=0x7e)
}
