//! DAG file preparation: naming, size/magic probing and (re)creation. The
//! compute and mmap lifecycle live in [`crate::full`]; this module only
//! decides what state the on-disk file is in.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::params::{DAG_MAGIC_NUM, DAG_MAGIC_NUM_SIZE, REVISION};
use crate::types::H256;

/// Outcome of probing the DAG file against the expected size and magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Memo {
    /// Size and magic both good: the dataset body can be trusted as-is.
    Match,
    /// Right size, no magic: the body must be (re)computed in place.
    Mismatch,
    /// Wrong size on disk: the file must be recreated before computing.
    SizeMismatch,
}

/// `~/.ethash`, the conventional per-user DAG directory.
pub(crate) fn default_dag_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "home directory is not available",
        ))
    })?;
    Ok(home.join(".ethash"))
}

/// File name for one epoch's DAG: revision plus the first 8 seed bytes, so
/// files from different epochs and revisions coexist in one directory.
pub(crate) fn dag_file_name(seed: &H256) -> String {
    format!("full-R{}-{}", REVISION, hex::encode(&seed.as_bytes()[..8]))
}

/// Open (creating if necessary) the DAG file for `seed` under `dir` and
/// report its state. With `force_create` the file is truncated to the
/// expected size first, which always yields [`Memo::Mismatch`].
pub(crate) fn prepare(
    dir: &Path,
    seed: &H256,
    full_size: u64,
    force_create: bool,
) -> Result<(File, Memo)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(dag_file_name(seed));
    let expected = full_size + DAG_MAGIC_NUM_SIZE as u64;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&path)?;
    let on_disk = file.metadata()?.len();

    if force_create || on_disk == 0 {
        file.set_len(expected)?;
        return Ok((file, Memo::Mismatch));
    }
    if on_disk != expected {
        return Ok((file, Memo::SizeMismatch));
    }

    let mut magic = [0u8; DAG_MAGIC_NUM_SIZE];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut magic)?;
    if u64::from_le_bytes(magic) == DAG_MAGIC_NUM {
        Ok((file, Memo::Match))
    } else {
        Ok((file, Memo::Mismatch))
    }
}
