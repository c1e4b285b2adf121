//! Epoch and seed derivation. Every block in an epoch shares one 32-byte
//! seed, obtained by iterating Keccak-256 over a zero seed once per elapsed
//! epoch.

use crate::error::{Error, Result};
use crate::params::{EPOCH_LENGTH, MAX_EPOCHS};
use crate::types::{keccak256, H256};

/// Epoch for a block number
pub fn epoch(block_number: u64) -> Result<u64> {
    let epoch = block_number / EPOCH_LENGTH;
    if epoch >= MAX_EPOCHS as u64 {
        return Err(Error::OutOfRange(block_number));
    }
    Ok(epoch)
}

/// Seed hash for the epoch containing `block_number`
pub fn get_seedhash(block_number: u64) -> Result<H256> {
    let epochs = epoch(block_number)?;
    let mut seed = H256::default();
    for _ in 0..epochs {
        seed = H256::from_bytes(keccak256(seed.as_bytes()));
    }
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_epoch_boundaries() {
        assert_eq!(epoch(0).unwrap(), 0);
        assert_eq!(epoch(EPOCH_LENGTH - 1).unwrap(), 0);
        assert_eq!(epoch(EPOCH_LENGTH).unwrap(), 1);
        assert!(matches!(
            epoch(EPOCH_LENGTH * MAX_EPOCHS as u64),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_seedhash_epoch_zero_is_zero() {
        assert_eq!(get_seedhash(0).unwrap(), H256::default());
        assert_eq!(get_seedhash(EPOCH_LENGTH - 1).unwrap(), H256::default());
    }

    #[test]
    fn test_seedhash_epoch_one() {
        // Keccak-256 over 32 zero bytes
        let expected = H256::from_bytes(hex!(
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        ));
        assert_eq!(get_seedhash(EPOCH_LENGTH).unwrap(), expected);
        assert_eq!(get_seedhash(EPOCH_LENGTH * 2 - 1).unwrap(), expected);
        assert_ne!(get_seedhash(EPOCH_LENGTH * 2).unwrap(), expected);
    }

    #[test]
    fn test_seedhash_out_of_range() {
        assert!(get_seedhash(EPOCH_LENGTH * MAX_EPOCHS as u64).is_err());
        assert!(get_seedhash(u64::MAX).is_err());
    }
}
