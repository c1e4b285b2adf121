//! Value types shared across the engine: 32-byte hashes, 64-byte dataset
//! nodes and the proof-of-work output pair.

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256, Keccak512};
use std::fmt;

use crate::params::{HASH_BYTES, NODE_WORDS};

/// 256-bit hash (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct H256(pub [u8; 32]);

impl H256 {
    /// Create from bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create from slice (must be 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self, &'static str> {
        if slice.len() != 32 {
            return Err("H256 requires exactly 32 bytes");
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex)?;
        Self::from_slice(&bytes).map_err(|_| hex::FromHexError::InvalidStringLength)
    }

    /// Check whether the hash, read as a big-endian 256-bit integer, is
    /// less than or equal to `boundary` read the same way.
    pub fn meets_boundary(&self, boundary: &H256) -> bool {
        // array comparison is lexicographic, which matches big-endian order
        self.0 <= boundary.0
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for H256 {
    fn default() -> Self {
        Self([0u8; 32])
    }
}

/// One 64-byte dataset/cache node, sixteen little-endian 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub bytes: [u8; HASH_BYTES],
}

impl Node {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; HASH_BYTES]) -> Self {
        Self { bytes }
    }

    /// Create from a 64-byte slice
    pub(crate) fn from_slice(slice: &[u8]) -> Self {
        let mut bytes = [0u8; HASH_BYTES];
        bytes.copy_from_slice(slice);
        Self { bytes }
    }

    /// Read word `w` as little-endian
    #[inline(always)]
    pub fn word(&self, w: usize) -> u32 {
        LittleEndian::read_u32(&self.bytes[w * 4..])
    }

    /// Write word `w` as little-endian
    #[inline(always)]
    pub fn set_word(&mut self, w: usize, value: u32) {
        LittleEndian::write_u32(&mut self.bytes[w * 4..], value);
    }

    /// Decode all sixteen words
    #[inline]
    pub(crate) fn words(&self) -> [u32; NODE_WORDS] {
        let mut words = [0u32; NODE_WORDS];
        LittleEndian::read_u32_into(&self.bytes, &mut words);
        words
    }

    /// Encode sixteen words back into a node
    #[inline]
    pub(crate) fn from_words(words: [u32; NODE_WORDS]) -> Self {
        let mut bytes = [0u8; HASH_BYTES];
        LittleEndian::write_u32_into(&words, &mut bytes);
        Self { bytes }
    }
}

/// Output of one proof-of-work evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfWork {
    /// Width-compressed mix, carried in the block header.
    pub mix_hash: H256,
    /// Final hash compared against the boundary.
    pub result: H256,
}

/// Keccak-256 (original padding) of `data`.
pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Keccak-512 (original padding) of `data`.
pub(crate) fn keccak512(data: &[u8]) -> [u8; HASH_BYTES] {
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&Keccak512::digest(data));
    out
}
