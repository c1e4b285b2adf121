//! Light mode: keep only the epoch cache in memory and regenerate each
//! accessed dataset node on the fly. Roughly three orders of magnitude less
//! memory than full mode, at a per-hash cost of `ACCESSES * MIX_NODES`
//! dataset-node derivations.

use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;
use crate::hashimoto::{hashimoto, DagSource};
use crate::seed::get_seedhash;
use crate::sizes::{get_cache_size, get_data_size};
use crate::types::{H256, ProofOfWork};

/// Verifier/miner handle that owns one epoch's cache.
///
/// A `Light` is immutable after construction and can be shared across
/// threads for concurrent [`compute`](Light::compute) calls. Resources are
/// released on drop.
pub struct Light {
    cache: Cache,
    block_number: u64,
}

impl Light {
    /// Build the cache for the epoch containing `block_number`.
    pub fn new(block_number: u64) -> Result<Light> {
        let seed = get_seedhash(block_number)?;
        let cache_size = get_cache_size(block_number)?;
        debug!(block_number, cache_size, "creating light handle");
        let cache = Cache::build(cache_size, &seed)?;
        Ok(Light {
            cache,
            block_number,
        })
    }

    /// Evaluate the proof of work for `(header_hash, nonce)` against this
    /// epoch's dataset size, regenerating dataset nodes from the cache.
    pub fn compute(&self, header_hash: &H256, nonce: u64) -> Result<ProofOfWork> {
        let full_size = get_data_size(self.block_number)?;
        self.compute_with_size(header_hash, nonce, full_size)
    }

    /// Same as [`compute`](Light::compute) with an explicit dataset size.
    /// Lets tests run the whole pipeline at reduced geometry.
    pub(crate) fn compute_with_size(
        &self,
        header_hash: &H256,
        nonce: u64,
        full_size: u64,
    ) -> Result<ProofOfWork> {
        hashimoto(DagSource::Light(&self.cache), full_size, header_hash, nonce)
    }

    /// Block number the handle was created for
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Cache size in bytes
    pub fn cache_size(&self) -> u64 {
        self.cache.len() as u64
    }

    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }
}
