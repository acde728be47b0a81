//! Decoders for the length-bin client hints format
//!
//! Decoding runs in three layers, each usable on its own:
//!
//! - [`RecordDecoder`]: pulls one `key.length.value` record off a buffer
//! - [`LengthBinDecoder`]: decodes a whole payload (raw or Base64) into
//!   [`ClientHints`](crate::protocol::ClientHints), keeping partial results on error
//! - [`CookieDecoder`]: finds the named cookie in a `Cookie` header and decodes its value
//!
//! # Example
//!
//! ```
//! use uach_cookie::codec::CookieDecoder;
//!
//! let decoder = CookieDecoder::default();
//! match decoder.decode("session=abc; wuach=bS4yLj8wcC45LiJXaW5kb3dzIm1kLjEwLiJQaXg=") {
//!     Ok(hints) => println!("decoded {} hints", hints.len()),
//!     Err(e) => {
//!         // the payload is truncated, but the first two records survived
//!         assert_eq!(e.partial().map(|hints| hints.len()), Some(2));
//!     }
//! }
//! ```
//!
//! # Limits
//!
//! - Maximum declared length of a record value: 1 MiB by default
//! - Lengths must fit the native signed integer

mod cookie_decoder;
mod length_bin_decoder;
mod record_decoder;

pub use cookie_decoder::{CookieDecoder, DEFAULT_COOKIE_NAME, decode_cookie};
pub use length_bin_decoder::{DEFAULT_MAX_RECORD_LEN, LengthBinDecoder};
pub use record_decoder::{Record, RecordDecoder};
