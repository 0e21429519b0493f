//! Symbol and k-gram hashing
//!
//! Symbols are hashed with FNV-1a over a seed, then combined into k-gram
//! hashes with a polynomial rolling hash (wrapping arithmetic, i.e. mod 2^64).

/// Seed of the structural hash space
pub const STRUCTURAL_SEED: u64 = 0x5354_5255_4354_0001;

/// Seed of the semantic hash space
pub const SEMANTIC_SEED: u64 = 0x5345_4d41_4e54_0002;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Rolling hash base (odd, large)
const BASE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hash a symbol made of several string parts in the given hash space
pub fn symbol_hash(seed: u64, parts: &[&str]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS ^ seed;
    for part in parts {
        for byte in part.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        // part separator, so ("ab", "c") != ("a", "bc")
        hash ^= 0xff;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash every k-gram of `symbols`
///
/// Returns `symbols.len() - k + 1` hashes, or none when fewer than `k`
/// symbols are available.
pub fn kgram_hashes(symbols: &[u64], k: usize) -> Vec<u64> {
    if k == 0 || symbols.len() < k {
        return Vec::new();
    }

    // BASE^(k-1), the weight of the symbol leaving the window
    let mut top = 1u64;
    for _ in 1..k {
        top = top.wrapping_mul(BASE);
    }

    let mut hashes = Vec::with_capacity(symbols.len() - k + 1);
    let mut hash = 0u64;
    for &symbol in &symbols[..k] {
        hash = hash.wrapping_mul(BASE).wrapping_add(symbol);
    }
    hashes.push(hash);

    for i in k..symbols.len() {
        hash = hash
            .wrapping_sub(symbols[i - k].wrapping_mul(top))
            .wrapping_mul(BASE)
            .wrapping_add(symbols[i]);
        hashes.push(hash);
    }

    hashes
}
