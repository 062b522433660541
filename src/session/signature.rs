//! Request signature derivation
//!
//! The redemption endpoint expects an `x-csrfcode` header derived from the
//! saas token key with a 5381/33 polynomial rolling hash. The value is not
//! cryptographic; it only has to match what the upstream computes for the
//! same key, so the arithmetic must be bit-for-bit reproducible.

/// Derive the `x-csrfcode` header value from a token key
///
/// Accumulator starts at 5381; each character folds in as
/// `acc + (acc << 5) + char_code` over the Unicode scalar values. The
/// final value is masked to its low 31 bits and rendered as decimal, so
/// the output is always in `[0, 2^31 - 1]`.
pub fn csrf_code(key: &str) -> String {
    let mut acc: u64 = 5381;
    for ch in key.chars() {
        acc = acc
            .wrapping_add(acc.wrapping_shl(5))
            .wrapping_add(ch as u64);
    }
    (acc & 0x7FFF_FFFF).to_string()
}
