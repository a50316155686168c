//! Script hashes and Base58Check addresses.
//!
//! A [`ScriptHash`] is held in big-endian order, the order used when it is
//! displayed as `0x…` hex. The VM stores script hashes little-endian, so
//! values coming off the stack go through [`ScriptHash::from_le_slice`].
//!
//! An address is `Base58Check(version || little-endian hash)` where the
//! checksum is the first four bytes of a double SHA-256.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of a script hash.
pub const SCRIPT_HASH_LEN: usize = 20;

/// Address version byte used by Neo N3 networks.
pub const DEFAULT_ADDRESS_VERSION: u8 = 0x35;

const CHECKSUM_LEN: usize = 4;
const ADDRESS_PAYLOAD_LEN: usize = 1 + SCRIPT_HASH_LEN + CHECKSUM_LEN;

/// 20-byte account or contract identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptHash([u8; SCRIPT_HASH_LEN]);

impl ScriptHash {
    pub const fn from_be_bytes(bytes: [u8; SCRIPT_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from the little-endian bytes found in a VM stack item.
    ///
    /// Returns `None` unless exactly 20 bytes are given.
    pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        let mut be: [u8; SCRIPT_HASH_LEN] = bytes.try_into().ok()?;
        be.reverse();
        Some(Self(be))
    }

    pub fn as_be_bytes(&self) -> &[u8; SCRIPT_HASH_LEN] {
        &self.0
    }

    pub fn to_le_bytes(&self) -> [u8; SCRIPT_HASH_LEN] {
        let mut le = self.0;
        le.reverse();
        le
    }

    /// Derive the human-readable address for this hash.
    pub fn to_address(&self, version: u8) -> Address {
        let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
        payload.push(version);
        payload.extend_from_slice(&self.to_le_bytes());
        let checksum = checksum(&payload);
        payload.extend_from_slice(&checksum);
        Address(bs58::encode(payload).into_string())
    }

    /// Recover the script hash from an address, verifying version and checksum.
    pub fn from_address(address: &str, version: u8) -> Result<Self> {
        let payload = bs58::decode(address)
            .into_vec()
            .map_err(|e| Error::InvalidScriptHash(format!("{}: {}", address, e)))?;
        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(Error::InvalidScriptHash(format!(
                "{}: expected {} decoded bytes, got {}",
                address,
                ADDRESS_PAYLOAD_LEN,
                payload.len()
            )));
        }
        let (body, tail) = payload.split_at(1 + SCRIPT_HASH_LEN);
        if checksum(body) != tail {
            return Err(Error::InvalidScriptHash(format!(
                "{}: checksum mismatch",
                address
            )));
        }
        if body[0] != version {
            return Err(Error::InvalidScriptHash(format!(
                "{}: address version 0x{:02x}, expected 0x{:02x}",
                address, body[0], version
            )));
        }
        Self::from_le_slice(&body[1..])
            .ok_or_else(|| Error::InvalidScriptHash(address.to_string()))
    }

    /// Parse `0x`-prefixed hex, bare 40-character hex, or an address.
    pub fn parse(text: &str, version: u8) -> Result<Self> {
        let trimmed = text.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.len() == SCRIPT_HASH_LEN * 2 && hex_part.bytes().all(|b| b.is_ascii_hexdigit())
        {
            let mut bytes = [0u8; SCRIPT_HASH_LEN];
            hex::decode_to_slice(hex_part, &mut bytes)
                .map_err(|e| Error::InvalidScriptHash(format!("{}: {}", text, e)))?;
            return Ok(Self(bytes));
        }

        Self::from_address(trimmed, version)
    }
}

impl FromStr for ScriptHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_ADDRESS_VERSION)
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptHash({})", self)
    }
}

impl Serialize for ScriptHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScriptHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Base58Check wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap address text after checking it decodes under `version`.
    pub fn parse(text: &str, version: u8) -> Result<Self> {
        ScriptHash::from_address(text.trim(), version)?;
        Ok(Self(text.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn script_hash(&self, version: u8) -> Result<ScriptHash> {
        ScriptHash::from_address(&self.0, version)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScriptHash {
        let mut bytes = [0u8; SCRIPT_HASH_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        ScriptHash::from_be_bytes(bytes)
    }

    #[test]
    fn wire_bytes_are_reversed() {
        let le: Vec<u8> = (1..=20).rev().collect();
        assert_eq!(ScriptHash::from_le_slice(&le), Some(sample()));
        assert_eq!(sample().to_le_bytes().to_vec(), le);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(ScriptHash::from_le_slice(&[0u8; 19]).is_none());
        assert!(ScriptHash::from_le_slice(&[0u8; 21]).is_none());
    }

    #[test]
    fn address_round_trips_and_starts_with_n() {
        let address = sample().to_address(DEFAULT_ADDRESS_VERSION);
        assert!(address.as_str().starts_with('N'));
        assert_eq!(address.as_str().len(), 34);
        assert_eq!(
            address.script_hash(DEFAULT_ADDRESS_VERSION).unwrap(),
            sample()
        );
    }

    #[test]
    fn known_vector() {
        let wire: Vec<u8> = (1..=20).collect();
        let hash = ScriptHash::from_le_slice(&wire).unwrap();
        assert_eq!(hash.to_string(), "0x14131211100f0e0d0c0b0a090807060504030201");
        assert_eq!(
            hash.to_address(DEFAULT_ADDRESS_VERSION).as_str(),
            "NL1JGjDe22U44R57ZXVSeRa4T7Jo1HDLF4"
        );
    }

    #[test]
    fn corrupted_address_fails_checksum() {
        let address = sample().to_address(DEFAULT_ADDRESS_VERSION).to_string();
        let mut chars: Vec<char> = address.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'a' { 'b' } else { 'a' };
        let corrupted: String = chars.into_iter().collect();
        assert!(ScriptHash::from_address(&corrupted, DEFAULT_ADDRESS_VERSION).is_err());
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let address = sample().to_address(0x17);
        let err = ScriptHash::from_address(address.as_str(), DEFAULT_ADDRESS_VERSION).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn parses_hex_forms() {
        let text = sample().to_string();
        assert!(text.starts_with("0x0102"));
        assert_eq!(text.parse::<ScriptHash>().unwrap(), sample());
        assert_eq!(
            ScriptHash::parse(&text[2..].to_uppercase(), DEFAULT_ADDRESS_VERSION).unwrap(),
            sample()
        );
    }

    #[test]
    fn parses_address_form() {
        let address = sample().to_address(DEFAULT_ADDRESS_VERSION);
        assert_eq!(address.as_str().parse::<ScriptHash>().unwrap(), sample());
    }

    #[test]
    fn serde_uses_hex_text() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, format!("\"{}\"", sample()));
        let back: ScriptHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
