//! Types shared by the decoders: the short key table, the decoded mapping and the
//! error taxonomy.
//!
//! # Components
//!
//! - **Header keys** ([`header_key`]): the fixed table translating short wire keys
//!   such as `arch` or `md` into canonical `Sec-CH-UA-*` header names
//!
//! - **Decoded hints** ([`ClientHints`]): the header name to value mapping produced by
//!   a decode call, which can be copied onto an outgoing [`http::Request`]
//!
//! - **Error handling** ([`error`]):
//!   - [`DecodeError`]: Top-level error type
//!   - [`ParseError`]: Length-bin grammar errors
//!   - [`PartialDecode`]: A grammar error together with the hints decoded before it
//!   - [`HeaderError`]: Conversion failures into `http` header types

pub mod header_key;

mod hints;
pub use hints::ClientHints;

mod error;
pub use error::DecodeError;
pub use error::ErrorKind;
pub use error::HeaderError;
pub use error::ParseError;
pub use error::PartialDecode;
