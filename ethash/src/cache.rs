//! Epoch cache construction. The cache is filled with SeqMemoHash: a
//! sequential Keccak-512 chain over the whole buffer, then [`CACHE_ROUNDS`]
//! passes in which each node is rehashed from its predecessor XOR a
//! pseudo-randomly chosen other node. Memory-hardness rests on each cell
//! depending on a pseudo-random other cell.

use byteorder::{ByteOrder, LittleEndian};
use tracing::info;

use crate::error::{Error, Result};
use crate::params::{CACHE_ROUNDS, HASH_BYTES};
use crate::types::{keccak512, H256};

/// Immutable per-epoch cache, a packed array of 64-byte nodes.
pub struct Cache {
    data: Vec<u8>,
}

impl Cache {
    /// Allocate and fill a cache of `cache_size` bytes from `seed`.
    pub fn build(cache_size: u64, seed: &H256) -> Result<Cache> {
        if cache_size == 0 || cache_size % HASH_BYTES as u64 != 0 {
            return Err(Error::InvalidCacheSize(cache_size));
        }
        let len = cache_size as usize;
        let num_nodes = len / HASH_BYTES;

        info!(
            cache_size,
            num_nodes, "generating epoch cache ({} MB)",
            cache_size / (1024 * 1024)
        );

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::Allocation(cache_size))?;
        data.resize(len, 0);

        // sequential fill: node 0 from the seed, then prev-node chaining
        data[..HASH_BYTES].copy_from_slice(&keccak512(seed.as_bytes()));
        for i in 1..num_nodes {
            let hash = keccak512(&data[(i - 1) * HASH_BYTES..i * HASH_BYTES]);
            data[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&hash);
        }

        // pseudo-random XOR rounds
        for _ in 0..CACHE_ROUNDS {
            for i in 0..num_nodes {
                let idx = self_word(&data, i) as usize % num_nodes;
                let prev = (num_nodes - 1 + i) % num_nodes;
                let mut mixed = [0u8; HASH_BYTES];
                for b in 0..HASH_BYTES {
                    mixed[b] = data[prev * HASH_BYTES + b] ^ data[idx * HASH_BYTES + b];
                }
                let hash = keccak512(&mixed);
                data[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&hash);
            }
        }

        Ok(Cache { data })
    }

    /// Cache size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of 64-byte nodes
    pub fn num_nodes(&self) -> usize {
        self.data.len() / HASH_BYTES
    }

    /// Raw bytes of the whole cache
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The 64-byte slice of node `i`
    #[inline(always)]
    pub(crate) fn node(&self, i: usize) -> &[u8] {
        &self.data[i * HASH_BYTES..(i + 1) * HASH_BYTES]
    }

    /// Word `w` of node `i`, little-endian
    #[inline(always)]
    pub(crate) fn node_word(&self, i: usize, w: usize) -> u32 {
        LittleEndian::read_u32(&self.data[i * HASH_BYTES + w * 4..])
    }
}

#[inline(always)]
fn self_word(data: &[u8], node: usize) -> u32 {
    LittleEndian::read_u32(&data[node * HASH_BYTES..])
}
