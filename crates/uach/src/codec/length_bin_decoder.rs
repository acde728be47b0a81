//! Decoder turning a whole length-bin payload into [`ClientHints`].
//!
//! The payload is decoded record by record with a [`RecordDecoder`]. When a record
//! is rejected, decoding stops and the hints collected so far travel back to the
//! caller inside the [`PartialDecode`] error.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::debug;

use crate::codec::RecordDecoder;
use crate::ensure;
use crate::protocol::{ClientHints, DecodeError, PartialDecode};

/// Default maximum declared length of a single record value: 1 MiB.
pub const DEFAULT_MAX_RECORD_LEN: usize = 1024 * 1024;

/// Decoder for `key.length.value` payloads.
///
/// ```
/// use bytes::Bytes;
/// use uach_cookie::codec::LengthBinDecoder;
///
/// let hints = LengthBinDecoder::new().decode(Bytes::from_static(b"m.2.?1p.9.\"Android\"")).unwrap();
/// assert_eq!(hints.get_str("Sec-CH-UA-Mobile"), Some("?1"));
/// assert_eq!(hints.get_str("Sec-CH-UA-Platform"), Some("\"Android\""));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBinDecoder {
    records: RecordDecoder,
}

impl LengthBinDecoder {
    pub fn new() -> Self {
        Self { records: RecordDecoder::new(DEFAULT_MAX_RECORD_LEN) }
    }

    /// Sets the maximum declared length accepted for a single record value.
    #[must_use]
    pub fn max_record_len(mut self, max_record_len: usize) -> Self {
        self.records = RecordDecoder::new(max_record_len);
        self
    }

    pub fn record_decoder(&self) -> RecordDecoder {
        self.records
    }

    /// Decodes every record in `src`.
    ///
    /// An empty buffer decodes to empty hints. Bytes left over after the last
    /// complete record are an error, there is no padding allowance.
    ///
    /// # Errors
    ///
    /// Returns [`PartialDecode`] carrying the first [`ParseError`](crate::protocol::ParseError)
    /// and every hint decoded before it.
    pub fn decode<B: Into<Bytes>>(&self, src: B) -> Result<ClientHints, PartialDecode> {
        let mut src = src.into();
        let mut hints = ClientHints::new();

        loop {
            match self.records.decode(&mut src) {
                Ok(Some(record)) => {
                    let name = record.header_name();
                    let (_, value) = record.into_parts();
                    hints.insert(name, value);
                }
                Ok(None) => return Ok(hints),
                Err(e) => {
                    debug!(cause = %e, decoded = hints.len(), remaining = src.len(), "length-bin payload rejected");
                    return Err(PartialDecode::new(hints, e));
                }
            }
        }
    }

    /// Base64-decodes `input` with the standard padded alphabet, then decodes the payload.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EmptyInput`] if `input` is empty
    /// - [`DecodeError::InvalidBase64`] if `input` is not valid Base64, with no partial hints
    /// - [`DecodeError::Payload`] if the decoded payload is malformed, see [`LengthBinDecoder::decode`]
    pub fn decode_base64(&self, input: &str) -> Result<ClientHints, DecodeError> {
        ensure!(!input.is_empty(), DecodeError::empty_input("input string cannot be empty"));

        let data = STANDARD.decode(input)?;
        Ok(self.decode(data)?)
    }
}

impl Default for LengthBinDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::header_key::*;
    use crate::protocol::{ErrorKind, ParseError};
    use proptest::prelude::*;

    const FULL_PAYLOAD: &str = "YXJjaC41LiJ4ODYiYnQuNC4iNjQiYnIuNjQuIkdvb2dsZSBDaHJvbWUiO3Y9IjEzNSIsICJOb3QtQS5CcmFuZCI7dj0iOCIsICJDaHJvbWl1bSI7dj0iMTM1ImZ2bC45MC4iR29vZ2xlIENocm9tZSI7dj0iMTM1LjAuNzA0OS40MiIsICJOb3QtQS5CcmFuZCI7dj0iOC4wLjAuMCIsICJDaHJvbWl1bSI7dj0iMTM1LjAuNzA0OS40MiJtLjIuPzBtZC4yLiIicC45LiJXaW5kb3dzInB2LjguIjE5LjAuMCJ1YWZ2LjE1LiIxMzUuMC43MDQ5LjQyIg==";

    fn encode<V: AsRef<[u8]>>(records: &[(&str, V)]) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in records {
            let value = value.as_ref();
            out.extend_from_slice(key.as_bytes());
            out.push(b'.');
            out.extend_from_slice(value.len().to_string().as_bytes());
            out.push(b'.');
            out.extend_from_slice(value);
        }
        out
    }

    #[test]
    fn empty_buffer() {
        let hints = LengthBinDecoder::new().decode(Bytes::new()).unwrap();
        assert!(hints.is_empty());
    }

    #[test]
    fn decode_full_payload() {
        let hints = LengthBinDecoder::new().decode_base64(FULL_PAYLOAD).unwrap();

        assert_eq!(hints.len(), 9);
        assert_eq!(hints.get_str(SEC_CH_UA_ARCH), Some(r#""x86""#));
        assert_eq!(hints.get_str(SEC_CH_UA_BITNESS), Some(r#""64""#));
        assert_eq!(
            hints.get_str(SEC_CH_UA_BRANDS),
            Some(r#""Google Chrome";v="135", "Not-A.Brand";v="8", "Chromium";v="135""#)
        );
        assert_eq!(
            hints.get_str(SEC_CH_UA_FULL_VERSION_LIST),
            Some(r#""Google Chrome";v="135.0.7049.42", "Not-A.Brand";v="8.0.0.0", "Chromium";v="135.0.7049.42""#)
        );
        assert_eq!(hints.get_str(SEC_CH_UA_MOBILE), Some("?0"));
        assert_eq!(hints.get_str(SEC_CH_UA_MODEL), Some(r#""""#));
        assert_eq!(hints.get_str(SEC_CH_UA_PLATFORM), Some(r#""Windows""#));
        assert_eq!(hints.get_str(SEC_CH_UA_PLATFORM_VERSION), Some(r#""19.0.0""#));
        assert_eq!(hints.get_str(SEC_CH_UA_FULL_VERSION), Some(r#""135.0.7049.42""#));
    }

    #[test]
    fn decode_arch_and_model() {
        let hints = LengthBinDecoder::new().decode_base64("YXJjaC41LiJ4ODYibWQuMi4iIg==").unwrap();

        let expected: ClientHints = [(SEC_CH_UA_ARCH, "\"x86\""), (SEC_CH_UA_MODEL, "\"\"")].into_iter().collect();
        assert_eq!(hints, expected);
    }

    #[test]
    fn unknown_keys_pass_through() {
        let hints = LengthBinDecoder::new().decode(encode(&[("wow64", "?0"), ("p", "\"Linux\"")])).unwrap();

        assert_eq!(hints.get_str("wow64"), Some("?0"));
        assert_eq!(hints.get_str(SEC_CH_UA_PLATFORM), Some("\"Linux\""));
    }

    #[test]
    fn non_utf8_keys_are_rejected() {
        let mut payload = encode(&[("m", "?1")]);
        payload.extend_from_slice(b"\xff.1.a\xfe.1.b");

        let err = LengthBinDecoder::new().decode(payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.partial().len(), 1);
        assert_eq!(err.partial().get_str(SEC_CH_UA_MOBILE), Some("?1"));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        // m.2.?0m.2.?1
        let hints = LengthBinDecoder::new().decode_base64("bS4yLj8wbS4yLj8x").unwrap();

        assert_eq!(hints.len(), 1);
        assert_eq!(hints.get_str(SEC_CH_UA_MOBILE), Some("?1"));
    }

    #[test]
    fn truncated_record_keeps_partial_hints() {
        // m.2.?0p.9."Windows"md.10."Pix
        let err = LengthBinDecoder::new().decode_base64("bS4yLj8wcC45LiJXaW5kb3dzIm1kLjEwLiJQaXg=").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        let partial = err.into_partial().unwrap();
        assert_eq!(partial.len(), 2);
        assert_eq!(partial.get_str(SEC_CH_UA_MOBILE), Some("?0"));
        assert_eq!(partial.get_str(SEC_CH_UA_PLATFORM), Some("\"Windows\""));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let mut payload = encode(&[("m", "?1")]);
        payload.extend_from_slice(b"md.");

        let err = LengthBinDecoder::new().decode(payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.partial().get_str(SEC_CH_UA_MOBILE), Some("?1"));
    }

    #[test]
    fn zero_length_record_is_rejected() {
        // br.0.m.2.?1
        let err = LengthBinDecoder::new().decode_base64("YnIuMC5tLjIuPzE=").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.partial(), Some(&ClientHints::new()));
    }

    #[test]
    fn overflow_keeps_partial_hints() {
        let mut payload = encode(&[("bt", "\"64\"")]);
        payload.extend_from_slice(format!("m.{}.?1", "1".repeat(64)).as_bytes());

        let err = LengthBinDecoder::new().decode(payload).unwrap_err();
        assert_eq!(err.error(), &ParseError::IntegerOverflow);
        assert_eq!(err.partial().get_str(SEC_CH_UA_BITNESS), Some("\"64\""));
    }

    #[test]
    fn record_length_limit() {
        let value = vec![b'a'; DEFAULT_MAX_RECORD_LEN];
        let hints = LengthBinDecoder::new().decode(encode(&[("md", &value)])).unwrap();
        assert_eq!(hints.get(SEC_CH_UA_MODEL).map(Bytes::len), Some(DEFAULT_MAX_RECORD_LEN));

        let value = vec![b'a'; DEFAULT_MAX_RECORD_LEN + 1];
        let err = LengthBinDecoder::new().decode(encode(&[("md", &value)])).unwrap_err();
        assert_eq!(err.error(), &ParseError::length_too_large(1_048_577, 1_048_576));

        // The limit applies to the declared length, not to the bytes present.
        let err = LengthBinDecoder::new().decode(Bytes::from_static(b"md.1048577.x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthTooLarge);
    }

    #[test]
    fn configured_record_length_limit() {
        let decoder = LengthBinDecoder::new().max_record_len(8);
        assert_eq!(decoder.record_decoder().max_record_len(), 8);

        let err = decoder.decode(encode(&[("m", "?1"), ("br", "\"Chromium\";v=\"137\"")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthTooLarge);
        assert_eq!(err.partial().len(), 1);
    }

    #[test]
    fn base64_errors() {
        let err = LengthBinDecoder::new().decode_base64("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);

        let err = LengthBinDecoder::new().decode_base64("bS4yLj8x!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBase64);
        assert!(err.partial().is_none());
    }

    proptest! {
        #[test]
        fn prop_reencoded_hints_roundtrip(
            records in prop::collection::hash_map("[a-z]{1,6}", prop::collection::vec(any::<u8>(), 1..64), 0..12)
        ) {
            let encoded: Vec<(&str, &[u8])> = records.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
            let hints = LengthBinDecoder::new().decode(encode(&encoded)).unwrap();

            let expected: ClientHints = records
                .iter()
                .map(|(key, value)| (lookup(key.as_bytes()).map_or_else(|| key.clone(), str::to_owned), value.clone()))
                .collect();
            prop_assert_eq!(hints, expected);
        }
    }
}
