// src/blockchain/selector.rs

use sha3::{Digest, Keccak256};

use crate::blockchain::models::is_felt;

/// Starknet keccak of a function name: keccak-256 truncated to 250 bits.
pub fn get_selector_from_name(name: &str) -> String {
    let mut hash = Keccak256::digest(name.as_bytes());
    hash[0] &= 0x03;
    to_felt_hex(&hash)
}

/// Selectors given as felts pass through; anything else is treated as a function name.
pub fn resolve_selector(entry_point: &str) -> String {
    if is_felt(entry_point) {
        entry_point.to_string()
    } else {
        get_selector_from_name(entry_point)
    }
}

fn to_felt_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    let digits = encoded.trim_start_matches('0');
    if digits.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", digits)
    }
}
