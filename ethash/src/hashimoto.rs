//! The hashimoto mix engine: derive a 64-byte seed from (header, nonce),
//! replicate it across the mix, fold in [`ACCESSES`] pseudo-random dataset
//! pages, compress, and finalize with Keccak-256.

use byteorder::{ByteOrder, LittleEndian};

use crate::cache::Cache;
use crate::dataset::calc_dataset_item;
use crate::error::{Error, Result};
use crate::fnv::{fnv_hash, FNV_PRIME};
use crate::params::{ACCESSES, HASH_BYTES, MIX_NODES, MIX_WORDS, NODE_WORDS};
use crate::types::{keccak256, keccak512, H256, ProofOfWork};

/// Bytes covered by one mix-wide dataset read.
const PAGE_BYTES: usize = 4 * MIX_WORDS;

/// Where dataset nodes come from during the mix loop.
#[derive(Clone, Copy)]
pub(crate) enum DagSource<'a> {
    /// Materialized dataset, a packed node array (magic prefix excluded).
    Full(&'a [u8]),
    /// Epoch cache; nodes are regenerated on demand.
    Light(&'a Cache),
}

pub(crate) fn hashimoto(
    dag: DagSource<'_>,
    full_size: u64,
    header_hash: &H256,
    nonce: u64,
) -> Result<ProofOfWork> {
    if full_size == 0 || full_size % MIX_WORDS as u64 != 0 {
        return Err(Error::InvalidDatasetSize(full_size));
    }
    let num_pages = (full_size / PAGE_BYTES as u64) as u32;
    if num_pages == 0 {
        return Err(Error::InvalidDatasetSize(full_size));
    }

    // 40-byte preamble: header hash then nonce, little-endian
    let mut preamble = [0u8; 40];
    preamble[..32].copy_from_slice(header_hash.as_bytes());
    LittleEndian::write_u64(&mut preamble[32..40], nonce);
    let seed = keccak512(&preamble);

    let mut seed_words = [0u32; NODE_WORDS];
    LittleEndian::read_u32_into(&seed, &mut seed_words);

    // replicate the seed across both mix nodes
    let mut mix = [0u32; MIX_WORDS];
    for (w, word) in mix.iter_mut().enumerate() {
        *word = seed_words[w % NODE_WORDS];
    }

    for i in 0..ACCESSES {
        let page = fnv_hash(seed_words[0] ^ i, mix[i as usize % MIX_WORDS]) % num_pages;
        for n in 0..MIX_NODES {
            let node_index = page * MIX_NODES as u32 + n as u32;
            match dag {
                DagSource::Full(nodes) => {
                    let off = node_index as usize * HASH_BYTES;
                    for w in 0..NODE_WORDS {
                        let word = LittleEndian::read_u32(&nodes[off + w * 4..]);
                        mix[n * NODE_WORDS + w] = fnv_hash(mix[n * NODE_WORDS + w], word);
                    }
                }
                DagSource::Light(cache) => {
                    let node = calc_dataset_item(cache, node_index);
                    for w in 0..NODE_WORDS {
                        mix[n * NODE_WORDS + w] =
                            fnv_hash(mix[n * NODE_WORDS + w], node.word(w));
                    }
                }
            }
        }
    }

    // compress in stride 4 down to 8 words
    let mut mix_hash = [0u8; 32];
    for w in (0..MIX_WORDS).step_by(4) {
        let mut reduced = mix[w];
        reduced = reduced.wrapping_mul(FNV_PRIME) ^ mix[w + 1];
        reduced = reduced.wrapping_mul(FNV_PRIME) ^ mix[w + 2];
        reduced = reduced.wrapping_mul(FNV_PRIME) ^ mix[w + 3];
        LittleEndian::write_u32(&mut mix_hash[w..w + 4], reduced);
    }

    let mut finale = [0u8; HASH_BYTES + 32];
    finale[..HASH_BYTES].copy_from_slice(&seed);
    finale[HASH_BYTES..].copy_from_slice(&mix_hash);

    Ok(ProofOfWork {
        mix_hash: H256::from_bytes(mix_hash),
        result: H256::from_bytes(keccak256(&finale)),
    })
}

/// Recompute only the final Keccak-256 step from a claimed mix hash. Lets a
/// verifier reject a bad candidate without touching cache or dataset.
pub fn quick_hash(header_hash: &H256, nonce: u64, mix_hash: &H256) -> H256 {
    let mut preamble = [0u8; 40];
    preamble[..32].copy_from_slice(header_hash.as_bytes());
    LittleEndian::write_u64(&mut preamble[32..40], nonce);

    let mut finale = [0u8; HASH_BYTES + 32];
    finale[..HASH_BYTES].copy_from_slice(&keccak512(&preamble));
    finale[HASH_BYTES..].copy_from_slice(mix_hash.as_bytes());
    H256::from_bytes(keccak256(&finale))
}

/// Check a candidate against a boundary using only the quick hash. The
/// result is read as a big-endian 256-bit integer and must be at most the
/// boundary read the same way.
pub fn quick_check_difficulty(
    header_hash: &H256,
    nonce: u64,
    mix_hash: &H256,
    boundary: &H256,
) -> bool {
    quick_hash(header_hash, nonce, mix_hash).meets_boundary(boundary)
}
