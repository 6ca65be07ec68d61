//! Record framing using nom
//!
//! Record layout:
//! ```text
//! MRCKV01\n
//! [4 bytes: version u32 little-endian]
//! [8 bytes: payload length u64 little-endian]
//! [payload bytes]
//! ```
//!
//! A record holds exactly one value. Trailing bytes after the payload are
//! rejected so a torn write can never be mistaken for a shorter value.

use nom::{
    bytes::complete::{tag, take, take_while1},
    combinator::all_consuming,
    number::complete::{le_u32, le_u64},
    IResult,
};

use crate::error::{Error, Result};

/// Magic header for record files
pub const RECORD_MAGIC: &[u8] = b"MRCKV01\n";

/// Current record format version
pub const RECORD_VERSION: u32 = 1;

/// Size of the fixed record header
pub const HEADER_LEN: usize = RECORD_MAGIC.len() + 4 + 8;

/// Maximum value size (5 MiB)
pub const MAX_VALUE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 128;

/// Record header
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    /// Record format version
    pub version: u32,
    /// Length of the payload that follows the header
    pub payload_len: u64,
}

fn header(input: &[u8]) -> IResult<&[u8], RecordHeader> {
    let (input, _) = tag(RECORD_MAGIC)(input)?;
    let (input, version) = le_u32(input)?;
    let (input, payload_len) = le_u64(input)?;
    Ok((input, RecordHeader { version, payload_len }))
}

fn payload(input: &[u8], len: usize) -> IResult<&[u8], &[u8]> {
    all_consuming(take(len))(input)
}

fn key_chars(input: &[u8]) -> IResult<&[u8], &[u8]> {
    all_consuming(take_while1(|c: u8| {
        c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b'.')
    }))(input)
}

/// Parse a full record and return its payload
pub fn parse_record(input: &[u8]) -> Result<&[u8]> {
    let (rest, header) = header(input)?;

    if header.version != RECORD_VERSION {
        return Err(Error::Parse(format!(
            "unsupported record version {}",
            header.version
        )));
    }

    let len = match usize::try_from(header.payload_len) {
        Ok(len) if len <= MAX_VALUE_SIZE => len,
        _ => {
            return Err(Error::Parse(format!(
                "payload length {} exceeds limit",
                header.payload_len
            )))
        }
    };

    let (_, body) = payload(rest, len)?;
    Ok(body)
}

/// Frame a value as a record
pub fn encode_record(value: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(HEADER_LEN + value.len());
    record.extend_from_slice(RECORD_MAGIC);
    record.extend_from_slice(&RECORD_VERSION.to_le_bytes());
    record.extend_from_slice(&(value.len() as u64).to_le_bytes());
    record.extend_from_slice(value);
    record
}

/// Check that a key is usable as a record name
///
/// Keys are 1 to 128 bytes of `[A-Za-z0-9_.-]` and may not start with `.`.
pub fn validate_key(key: &str) -> Result<()> {
    let bytes = key.as_bytes();
    if bytes.len() > MAX_KEY_LEN || bytes.first() == Some(&b'.') || key_chars(bytes).is_err() {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = encode_record(b"{\"a\":1}");
        let body = parse_record(&record).unwrap();
        assert_eq!(body, b"{\"a\":1}");
    }

    #[test]
    fn test_parse_empty_payload() {
        let record = encode_record(b"");
        assert_eq!(parse_record(&record).unwrap(), b"");
    }

    #[test]
    fn test_parse_record_invalid_magic() {
        let mut record = encode_record(b"data");
        record[0] = b'X';

        assert!(matches!(parse_record(&record), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_record_wrong_version() {
        let mut record = encode_record(b"data");
        record[RECORD_MAGIC.len()] = 9;

        let err = parse_record(&record).unwrap_err();
        assert!(err.to_string().contains("version 9"));
    }

    #[test]
    fn test_parse_record_truncated() {
        let record = encode_record(b"some longer payload");
        let result = parse_record(&record[..record.len() - 3]);
        assert!(matches!(result, Err(Error::Parse(_))));

        let result = parse_record(&record[..HEADER_LEN - 1]);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_record_trailing_bytes() {
        let mut record = encode_record(b"data");
        record.extend_from_slice(b"junk");

        assert!(matches!(parse_record(&record), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_record_oversized_length() {
        let mut record = encode_record(b"");
        let len_at = RECORD_MAGIC.len() + 4;
        record[len_at..len_at + 8].copy_from_slice(&u64::MAX.to_le_bytes());

        let err = parse_record(&record).unwrap_err();
        assert!(err.to_string().contains("exceeds limit"));
    }

    #[test]
    fn test_encode_record_format() {
        let record = encode_record(b"abc");

        assert_eq!(&record[0..8], RECORD_MAGIC);
        assert_eq!(u32::from_le_bytes(record[8..12].try_into().unwrap()), 1);
        assert_eq!(u64::from_le_bytes(record[12..20].try_into().unwrap()), 3);
        assert_eq!(&record[20..], b"abc");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("mrc_assistant_cache").is_ok());
        assert!(validate_key("v1.backup-2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("espace vide").is_err());
        assert!(validate_key("clé").is_err());
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN + 1)).is_err());
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN)).is_ok());
    }
}
