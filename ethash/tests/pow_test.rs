//! End-to-end tests against the published Ethash vectors, run through the
//! public handle API at real epoch-0 sizes.

use ethash::{
    get_cache_size, get_data_size, get_seedhash, quick_check_difficulty, quick_hash, Full, H256,
    Light, EPOCH_LENGTH,
};
use hex_literal::hex;
use once_cell::sync::Lazy;

// epoch-0 cache shared across tests; building it is the expensive part
static LIGHT_22: Lazy<Light> = Lazy::new(|| Light::new(22).unwrap());

const HEADER_22: [u8; 32] =
    hex!("372eca2454ead349c3df0ab5d00b0b706b23e49d469387db91811cee0358fc6d");
const NONCE_22: u64 = 0x495732e0ed7a801c;
const MIX_22: [u8; 32] =
    hex!("2f74cdeb198af0b9abe65d22d372e22fb2d474371774a9583c1cc427a07939f5");
const RESULT_22: [u8; 32] =
    hex!("00000b184f1fdd88bfd94c86c39e65db0c36144d5e43f745f722196e730cb614");

#[test]
fn golden_block_22_light() {
    let header = H256::from_bytes(HEADER_22);
    let pow = LIGHT_22.compute(&header, NONCE_22).unwrap();
    assert_eq!(pow.mix_hash, H256::from_bytes(MIX_22));
    assert_eq!(pow.result, H256::from_bytes(RESULT_22));

    // quick verification agrees without the memory-hard loop
    assert_eq!(quick_hash(&header, NONCE_22, &pow.mix_hash), pow.result);

    // boundary check both ways around the known result
    let mut above = RESULT_22;
    above[2] += 1;
    let mut below = RESULT_22;
    below[2] -= 1;
    assert!(quick_check_difficulty(
        &header,
        NONCE_22,
        &pow.mix_hash,
        &H256::from_bytes(above)
    ));
    assert!(!quick_check_difficulty(
        &header,
        NONCE_22,
        &pow.mix_hash,
        &H256::from_bytes(below)
    ));
}

#[test]
fn light_handle_reports_epoch_parameters() {
    assert_eq!(LIGHT_22.block_number(), 22);
    assert_eq!(LIGHT_22.cache_size(), get_cache_size(22).unwrap());
    assert_eq!(get_cache_size(22).unwrap(), 16776896);
    assert_eq!(get_data_size(22).unwrap(), 1073739904);
}

#[test]
fn seedhash_depends_only_on_epoch() {
    assert_eq!(get_seedhash(0).unwrap(), get_seedhash(EPOCH_LENGTH - 1).unwrap());
    assert_ne!(
        get_seedhash(EPOCH_LENGTH - 1).unwrap(),
        get_seedhash(EPOCH_LENGTH).unwrap()
    );
    assert_eq!(
        get_seedhash(EPOCH_LENGTH).unwrap(),
        H256::from_bytes(hex!(
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        ))
    );
}

#[test]
fn constructors_reject_blocks_past_the_table() {
    assert!(Light::new(EPOCH_LENGTH * 2048).is_err());
    assert!(get_seedhash(EPOCH_LENGTH * 2048).is_err());
    assert!(get_cache_size(u64::MAX).is_err());
    assert!(get_data_size(u64::MAX).is_err());
}

/// Materializes the real 1 GiB epoch-0 DAG; run with `--ignored` and
/// plenty of disk.
#[test]
#[ignore]
fn golden_block_22_full() {
    let _ = tracing_subscriber::fmt::try_init();
    let dir = std::env::temp_dir().join(format!("ethash-full-e2e-{}", std::process::id()));
    let header = H256::from_bytes(HEADER_22);

    let mut last_pct = 0u32;
    let mut progress = |pct: u32| {
        last_pct = pct;
        true
    };
    let full = Full::new_in(&dir, &LIGHT_22, Some(&mut progress)).unwrap();
    assert_eq!(last_pct, 100);
    assert_eq!(full.dag_size(), get_data_size(22).unwrap());

    let pow = full.compute(&header, NONCE_22).unwrap();
    assert_eq!(pow.mix_hash, H256::from_bytes(MIX_22));
    assert_eq!(pow.result, H256::from_bytes(RESULT_22));
    drop(full);

    // reattach from disk without recomputing
    let mut recount = 0u32;
    let mut no_progress = |_pct: u32| {
        recount += 1;
        true
    };
    let reopened = Full::new_in(&dir, &LIGHT_22, Some(&mut no_progress)).unwrap();
    assert_eq!(recount, 0);
    assert_eq!(
        reopened.compute(&header, NONCE_22).unwrap().result,
        H256::from_bytes(RESULT_22)
    );
    drop(reopened);

    std::fs::remove_dir_all(&dir).unwrap();
}
