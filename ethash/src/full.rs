//! Full mode: the entire epoch dataset materialized to a memory-mapped
//! file and hashed against directly. The mapping and its backing file are
//! a tied pair, released together when the handle drops.
//!
//! On-disk layout: an 8-byte little-endian magic number, then the packed
//! node array. The magic is written, and flushed, only after every node
//! write has been flushed, so a reader that observes it may trust the body.

use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapMut};
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::dataset::compute_full_data;
use crate::error::Result;
use crate::hashimoto::{hashimoto, DagSource};
use crate::io::{self, Memo};
use crate::light::Light;
use crate::params::{DAG_MAGIC_NUM, DAG_MAGIC_NUM_SIZE};
use crate::seed::get_seedhash;
use crate::sizes::get_data_size;
use crate::types::{H256, ProofOfWork};

/// DAG build progress callback. Receives 0-100; returning `false` aborts
/// the build with [`Canceled`](crate::Error::Canceled).
pub type Progress<'a> = &'a mut dyn FnMut(u32) -> bool;

/// Handle that owns one epoch's memory-mapped dataset.
///
/// Immutable after construction; may be shared across threads for
/// concurrent [`compute`](Full::compute) calls. Dropping the handle unmaps
/// the region and closes the file, leaving the DAG on disk for reuse.
pub struct Full {
    // declaration order matters: unmap before the file closes
    map: Mmap,
    #[allow(dead_code)]
    file: File,
    file_size: u64,
}

impl Full {
    /// Materialize (or reattach to) the dataset for `light`'s epoch in the
    /// default DAG directory.
    pub fn new(light: &Light, progress: Option<Progress<'_>>) -> Result<Full> {
        let dir = io::default_dag_dir()?;
        Self::new_in(&dir, light, progress)
    }

    /// Same as [`new`](Full::new) with an explicit DAG directory.
    pub fn new_in(dir: &Path, light: &Light, progress: Option<Progress<'_>>) -> Result<Full> {
        let full_size = get_data_size(light.block_number())?;
        let seed = get_seedhash(light.block_number())?;
        Self::new_internal(dir, &seed, full_size, light.cache(), progress)
    }

    /// Construction with explicit seed and dataset size. The cache is only
    /// borrowed for the build; the returned handle is independent of it.
    pub(crate) fn new_internal(
        dir: &Path,
        seed: &H256,
        full_size: u64,
        cache: &Cache,
        progress: Option<Progress<'_>>,
    ) -> Result<Full> {
        let (file, memo) = io::prepare(dir, seed, full_size, false)?;
        let file = match memo {
            Memo::Match => {
                debug!(full_size, "reusing completed DAG file");
                // Safety: the file is not resized while mapped; concurrent
                // writers to the same DAG file are excluded by the caller.
                let map = unsafe { Mmap::map(&file)? };
                return Ok(Full {
                    map,
                    file,
                    file_size: full_size,
                });
            }
            Memo::SizeMismatch => {
                warn!(full_size, "existing DAG file has unexpected size, recreating");
                let (file, _) = io::prepare(dir, seed, full_size, true)?;
                file
            }
            Memo::Mismatch => file,
        };

        info!(full_size, "generating DAG file ({} MB)", full_size / (1024 * 1024));
        // Safety: as above.
        let mut map = unsafe { MmapMut::map_mut(&file)? };
        compute_full_data(&mut map[DAG_MAGIC_NUM_SIZE..], cache, progress)?;

        // the body must be durable before the magic certifies it
        map.flush()?;
        map[..DAG_MAGIC_NUM_SIZE].copy_from_slice(&DAG_MAGIC_NUM.to_le_bytes());
        map.flush_range(0, DAG_MAGIC_NUM_SIZE)?;

        let map = map.make_read_only()?;
        Ok(Full {
            map,
            file,
            file_size: full_size,
        })
    }

    /// Evaluate the proof of work for `(header_hash, nonce)` against the
    /// mapped dataset.
    pub fn compute(&self, header_hash: &H256, nonce: u64) -> Result<ProofOfWork> {
        hashimoto(DagSource::Full(self.dag()), self.file_size, header_hash, nonce)
    }

    /// Read-only view of the dataset, magic prefix excluded
    pub fn dag(&self) -> &[u8] {
        &self.map[DAG_MAGIC_NUM_SIZE..]
    }

    /// Dataset size in bytes
    pub fn dag_size(&self) -> u64 {
        self.file_size
    }
}
