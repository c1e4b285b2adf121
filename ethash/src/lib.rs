//! Ethash - memory-hard proof-of-work engine
//!
//! Given a block height, a 32-byte header hash and a 64-bit nonce, the
//! engine produces a mix digest and a final result hash for comparison
//! against a target boundary. Two modes are provided: [`Light`] keeps only
//! the epoch cache in memory and regenerates dataset nodes on demand;
//! [`Full`] materializes the multi-gigabyte dataset to a memory-mapped file
//! and hashes against it directly.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod fnv;
pub mod full;
pub mod hashimoto;
mod io;
pub mod light;
pub mod params;
pub mod seed;
pub mod sizes;
pub mod types;

// Re-export main types
pub use cache::Cache;
pub use dataset::calc_dataset_item;
pub use error::{Error, Result};
pub use full::{Full, Progress};
pub use hashimoto::{quick_check_difficulty, quick_hash};
pub use light::Light;
pub use params::*;
pub use seed::{epoch, get_seedhash};
pub use sizes::{get_cache_size, get_data_size};
pub use types::{H256, Node, ProofOfWork};
