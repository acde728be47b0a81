//! Decoding of User-Agent Client Hints persisted in a cookie
//!
//! Browsers that freeze their User-Agent string expose the interesting details
//! (architecture, platform, brand list, mobile flag, ...) as `Sec-CH-UA-*` Client
//! Hints headers instead. Some deployments capture those hints once on the client
//! and store them in a cookie, so every later request carries them without the
//! Accept-CH round trip. This crate turns such a cookie back into the header map.
//!
//! # Wire format
//!
//! The cookie value is standard Base64 wrapping a concatenation of records:
//!
//! ```text
//! <short key>.<decimal length>.<value bytes><short key>.<decimal length>.<value bytes>...
//! ```
//!
//! Short keys are translated through a fixed table ([`protocol::header_key`]),
//! e.g. `arch` becomes `Sec-CH-UA-Arch`. Unknown keys are kept as they are.
//!
//! # Example
//!
//! ```
//! use http::Request;
//! use uach_cookie::decode_headers_from_cookie;
//!
//! let cookie_header = r#"foo=bar; wuach=YXJjaC41LiJ4ODYibWQuMi4iIg=="#;
//!
//! let hints = decode_headers_from_cookie("wuach", cookie_header).unwrap();
//! assert_eq!(hints.get_str("Sec-CH-UA-Arch"), Some(r#""x86""#));
//! assert_eq!(hints.get_str("Sec-CH-UA-Model"), Some(r#""""#));
//!
//! // copy the hints onto a request for whatever consumes them downstream
//! let mut request = Request::get("http://example.com").body(()).unwrap();
//! hints.apply_to_request(&mut request).unwrap();
//! assert_eq!(request.headers()["sec-ch-ua-arch"], r#""x86""#);
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: the record, payload and cookie decoders
//! - [`protocol`]: the short key table, the decoded [`ClientHints`](protocol::ClientHints)
//!   mapping and the error types
//!
//! # Error Handling
//!
//! - [`protocol::DecodeError`]: Top-level error type, classified by [`protocol::ErrorKind`]
//! - [`protocol::ParseError`]: Record grammar errors
//! - [`protocol::PartialDecode`]: A grammar error plus the hints decoded before it
//!
//! A malformed payload does not discard what was decoded before the bad record:
//! [`protocol::DecodeError::partial`] returns it. An error still means the mapping
//! is incomplete.
//!
//! # Limits
//!
//! - Maximum declared length of a record value: 1 MiB (configurable)
//! - Decoding is a single forward pass, linear in the input size
//! - Decoded values share the Base64-decoded buffer, they are never copied or expanded

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

use bytes::Bytes;

use crate::codec::LengthBinDecoder;
use crate::protocol::{ClientHints, DecodeError, PartialDecode};

/// Finds the cookie named `cookie_name` in a raw `Cookie` header and decodes the
/// client hints stored in it, with the default record length limit.
///
/// # Errors
///
/// See [`codec::decode_cookie`].
pub fn decode_headers_from_cookie(cookie_name: &str, cookie_header: &str) -> Result<ClientHints, DecodeError> {
    codec::decode_cookie(&LengthBinDecoder::new(), cookie_name, cookie_header)
}

/// Decodes a Base64 length-bin string into client hints.
///
/// # Errors
///
/// See [`LengthBinDecoder::decode_base64`].
pub fn decode_length_bin_base64(input: &str) -> Result<ClientHints, DecodeError> {
    LengthBinDecoder::new().decode_base64(input)
}

/// Decodes an already Base64-decoded length-bin buffer into client hints.
///
/// # Errors
///
/// See [`LengthBinDecoder::decode`].
pub fn decode_length_bin<B: Into<Bytes>>(buffer: B) -> Result<ClientHints, PartialDecode> {
    LengthBinDecoder::new().decode(buffer)
}
