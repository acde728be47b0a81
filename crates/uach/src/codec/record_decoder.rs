//! Decoder for a single `key.length.value` record.
//!
//! A length-bin payload is a plain concatenation of records:
//!
//! ```text
//! arch.5."x86"md.2.""
//! ^^^^ ^ ^^^^^
//! key  | value (exactly `length` bytes, no trailing delimiter)
//!      length (ASCII decimal)
//! ```
//!
//! Every record is parsed in a single forward scan. The decoder never backtracks
//! and never reads past the declared value, so the next record's key starts right
//! where the previous value ended.

use bytes::Bytes;
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;
use crate::protocol::header_key;

const DELIMITER: u8 = b'.';

/// Upper bound for the length accumulator before the next `* 10` fold.
///
/// Lengths are folded in a `usize` but must stay representable as the native
/// signed integer, so the bound is derived from `isize::MAX`.
const MAX_LENGTH_DIV_10: usize = isize::MAX.unsigned_abs() / 10;

/// One decoded record: the raw short key and its verbatim value.
///
/// The value is a slice of the decoded buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    value: Bytes,
}

impl Record {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// The name this record is stored under: the canonical header name for known
    /// short keys, the short key itself otherwise.
    pub fn header_name(&self) -> String {
        match header_key::lookup(self.key.as_bytes()) {
            Some(name) => name.to_owned(),
            None => self.key.clone(),
        }
    }

    pub fn into_parts(self) -> (String, Bytes) {
        (self.key, self.value)
    }
}

/// Pulls records off the front of a length-bin buffer one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDecoder {
    max_record_len: usize,
}

impl RecordDecoder {
    /// Creates a decoder rejecting any record whose declared length is above `max_record_len`.
    pub fn new(max_record_len: usize) -> Self {
        Self { max_record_len }
    }

    pub fn max_record_len(&self) -> usize {
        self.max_record_len
    }

    /// Decodes the record at the front of `src` and advances `src` past it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a complete record was decoded
    /// - `Ok(None)` if `src` is empty
    /// - `Err(ParseError)` if the bytes at the front of `src` are not a valid record,
    ///   in which case `src` is left untouched
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidFormat`] on a missing delimiter, an empty or non-UTF-8 key, a
    ///   non-digit or empty length, a zero length, or a value shorter than declared
    /// - [`ParseError::IntegerOverflow`] if the length digits don't fit the native integer
    /// - [`ParseError::LengthTooLarge`] if the declared length exceeds the configured limit
    pub fn decode(&self, src: &mut Bytes) -> Result<Option<Record>, ParseError> {
        if src.is_empty() {
            return Ok(None);
        }

        let key_end = src
            .iter()
            .position(|b| *b == DELIMITER)
            .ok_or_else(|| ParseError::invalid_format("missing delimiter after key"))?;
        ensure!(key_end > 0, ParseError::invalid_format("empty key found"));
        let key = std::str::from_utf8(&src[..key_end])
            .map_err(|e| ParseError::invalid_format(format!("key is not valid UTF-8: {e}")))?
            .to_owned();

        let digits_start = key_end + 1;
        let digits_end = digits_start + src[digits_start..].iter().take_while(|b| b.is_ascii_digit()).count();
        ensure!(src.get(digits_end) == Some(&DELIMITER), ParseError::invalid_format("missing delimiter after length"));
        ensure!(digits_end > digits_start, ParseError::invalid_format("missing length digits"));

        let length = parse_length(&src[digits_start..digits_end])?;
        ensure!(length > 0, ParseError::invalid_format(format!("invalid length {length} (must be positive)")));
        ensure!(length <= self.max_record_len, ParseError::length_too_large(length, self.max_record_len));

        let value_start = digits_end + 1;
        let remaining = src.len() - value_start;
        ensure!(
            length <= remaining,
            ParseError::invalid_format(format!("declared length {length} exceeds the {remaining} remaining bytes"))
        );

        let value = src.split_to(value_start + length).split_off(value_start);

        trace!(key = %key, value_len = length, "decoded length-bin record");
        Ok(Some(Record { key, value }))
    }
}

/// Folds ASCII digits into a length, failing before the accumulator can overflow.
///
/// For example "251" folds as 2, then 2 * 10 + 5 = 25, then 25 * 10 + 1 = 251.
fn parse_length(digits: &[u8]) -> Result<usize, ParseError> {
    let mut length: usize = 0;
    for digit in digits {
        ensure!(length <= MAX_LENGTH_DIV_10, ParseError::IntegerOverflow);
        length = length * 10 + usize::from(digit - b'0');
    }
    Ok(length)
}
