//! Dataset-node generation. Every 64-byte dataset node is derived from the
//! epoch cache alone, so the full dataset can either be materialized once
//! (full mode) or rebuilt node-by-node on demand (light mode).

use rayon::prelude::*;
use tracing::info;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::fnv::fnv_hash;
use crate::full::Progress;
use crate::params::{DATASET_PARENTS, HASH_BYTES, MIX_BYTES, NODE_WORDS};
use crate::types::{keccak512, Node};

/// Compute dataset node `node_index` from the cache.
pub fn calc_dataset_item(cache: &Cache, node_index: u32) -> Node {
    let num_parents = cache.num_nodes() as u32;

    let mut init = Node::from_slice(cache.node((node_index % num_parents) as usize));
    init.set_word(0, init.word(0) ^ node_index);

    let mut words = Node::from_bytes(keccak512(&init.bytes)).words();
    for i in 0..DATASET_PARENTS {
        let parent = fnv_hash(node_index ^ i, words[i as usize % NODE_WORDS]) % num_parents;
        let parent = parent as usize;
        for w in 0..NODE_WORDS {
            words[w] = fnv_hash(words[w], cache.node_word(parent, w));
        }
    }

    Node::from_bytes(keccak512(&Node::from_words(words).bytes))
}

/// Fill `data` with consecutive dataset nodes. `data` is the node region of
/// a mapped DAG file (the magic prefix excluded). The progress callback is
/// invoked roughly once per percent with a 0-100 value; returning `false`
/// aborts the build with [`Error::Canceled`].
///
/// Nodes are independent, so each percent chunk is computed in parallel;
/// cancellation is only observed between chunks.
pub(crate) fn compute_full_data(
    data: &mut [u8],
    cache: &Cache,
    mut progress: Option<Progress<'_>>,
) -> Result<()> {
    let full_size = data.len() as u64;
    if data.is_empty()
        || data.len() % MIX_BYTES != 0
        || data.len() % HASH_BYTES != 0
    {
        return Err(Error::InvalidDatasetSize(full_size));
    }
    let num_nodes = data.len() / HASH_BYTES;
    info!(full_size, num_nodes, "computing full dataset");

    let chunk_nodes = (num_nodes / 100).max(1);
    for (chunk_idx, chunk) in data.chunks_mut(chunk_nodes * HASH_BYTES).enumerate() {
        let base = chunk_idx * chunk_nodes;
        if let Some(cb) = progress.as_mut() {
            let pct = (base * 100 / num_nodes) as u32;
            if !cb(pct) {
                return Err(Error::Canceled);
            }
        }
        chunk
            .par_chunks_mut(HASH_BYTES)
            .enumerate()
            .for_each(|(i, out)| {
                let node = calc_dataset_item(cache, (base + i) as u32);
                out.copy_from_slice(&node.bytes);
            });
    }

    if let Some(cb) = progress.as_mut() {
        if !cb(100) {
            return Err(Error::Canceled);
        }
    }
    Ok(())
}
