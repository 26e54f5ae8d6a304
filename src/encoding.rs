//! Base58 and Base58Check encoding.
//!
//! Base58Check = payload ‖ first four bytes of SHA256(SHA256(payload)).
//! Leading 0x00 bytes in the payload map to leading `1` characters and are
//! preserved by the underlying `base58` crate on both directions.

use base58::{FromBase58, FromBase58Error, ToBase58};

use crate::error::KeyError;
use crate::hashing::double_sha256;

/// Encodes `payload` as Base58Check.
pub fn encode_check(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    data.to_base58()
}

/// Decodes a Base58Check string, verifying the trailing four-byte checksum
/// and returning the payload (without the checksum).
pub fn decode_check(s: &str) -> Result<Vec<u8>, KeyError> {
    let data = s.from_base58().map_err(|e| match e {
        FromBase58Error::InvalidBase58Character(_, _) => KeyError::InvalidCharacter,
        FromBase58Error::InvalidBase58Length => KeyError::UnrecognizedFormat,
    })?;

    if data.len() < 4 {
        return Err(KeyError::UnrecognizedFormat);
    }

    let (payload, checksum) = data.split_at(data.len() - 4);
    let expected = double_sha256(payload);
    if checksum != &expected[..4] {
        return Err(KeyError::InvalidChecksum);
    }

    Ok(payload.to_vec())
}
