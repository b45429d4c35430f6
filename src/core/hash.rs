//! FNV-1a Mixing Primitive
//!
//! Folds 64-bit words into a running 64-bit state, one octet at a time.
//! Every derived value in the crate is produced by this function, so its
//! output must never change between releases.

/// FNV-1a 64-bit offset basis.
pub const OFFSET_BASIS: u64 = 14695981039346656037;

/// FNV-1a 64-bit prime.
pub const PRIME: u64 = 1099511628211;

/// Hash the eight octets of `value` into `state`.
///
/// Octets are taken least-significant first. Each one is XORed into the
/// state, which is then multiplied by [`PRIME`] modulo 2^64.
///
/// # Example
///
/// ```
/// use pgen::core::hash::{hash, OFFSET_BASIS};
///
/// let a = hash(OFFSET_BASIS, 42);
/// assert_eq!(a, hash(OFFSET_BASIS, 42));
/// assert_ne!(a, hash(OFFSET_BASIS, 43));
/// ```
#[inline]
pub fn hash(state: u64, value: u64) -> u64 {
    value
        .to_le_bytes()
        .iter()
        .fold(state, |s, &octet| (s ^ octet as u64).wrapping_mul(PRIME))
}

/// Derive the raw value for a (seed, index) pair.
///
/// The seed is folded into the offset basis first, then the index into
/// that intermediate state. Both are reinterpreted as unsigned.
#[inline]
pub fn derive(seed: i64, index: i64) -> u64 {
    hash(hash(OFFSET_BASIS, seed as u64), index as u64)
}

/// Mask of all ones up to and including the highest set bit of `n`.
///
/// Scans from bit 63 downwards, clearing mask bits until a set bit of `n`
/// is found. `umask(0)` is 0. For powers of two the result is `2n - 1`.
pub fn umask(n: u64) -> u64 {
    let mut mask = u64::MAX;
    let mut probe = 1u64 << 63;

    for _ in 0..64 {
        if n & probe == probe {
            break;
        }
        mask ^= probe;
        probe >>= 1;
    }

    mask
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Byte cascade written out longhand, one octet per step.
    fn hash_longhand(mut s: u64, v: u64) -> u64 {
        for shift in (0..64).step_by(8) {
            s ^= (v >> shift) & 0xff;
            s = s.wrapping_mul(PRIME);
        }
        s
    }

    #[test]
    fn test_hash_of_zero_octets() {
        // Eight zero octets: XOR is a no-op, so only the multiplies remain.
        let expected = (0..8).fold(OFFSET_BASIS, |s, _| s.wrapping_mul(PRIME));
        assert_eq!(hash(OFFSET_BASIS, 0), expected);
    }

    #[test]
    fn test_hash_matches_longhand() {
        for &(s, v) in &[
            (OFFSET_BASIS, 0u64),
            (OFFSET_BASIS, 42),
            (0, u64::MAX),
            (u64::MAX, 0x0102_0304_0506_0708),
        ] {
            assert_eq!(hash(s, v), hash_longhand(s, v));
        }
    }

    #[test]
    fn test_hash_octet_order_matters() {
        // Same octets, opposite order.
        assert_ne!(
            hash(OFFSET_BASIS, 0x0102_0304_0506_0708),
            hash(OFFSET_BASIS, 0x0807_0605_0403_0201)
        );
    }

    #[test]
    fn test_derive_known_value() {
        // These values must never change!
        assert_eq!(derive(42, 1), 11479527560254063790);
        assert_eq!(derive(0, 0), 9808874869469701221);
        assert_eq!(derive(-1, 5), 15935834488840175416);
    }

    #[test]
    fn test_derive_is_two_stage_hash() {
        assert_eq!(derive(42, 1), hash(hash(OFFSET_BASIS, 42), 1));
        assert_eq!(derive(-7, 3), hash(hash(OFFSET_BASIS, (-7i64) as u64), 3));
    }

    #[test]
    fn test_umask_known_values() {
        assert_eq!(umask(0), 0);
        assert_eq!(umask(22), 31);
        assert_eq!(umask(122112), 131071);
    }

    #[test]
    fn test_umask_edges() {
        assert_eq!(umask(1), 1);
        assert_eq!(umask(2), 3);
        assert_eq!(umask(1 << 53), (1 << 54) - 1);
        assert_eq!(umask(1 << 63), u64::MAX);
        assert_eq!(umask(u64::MAX), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_umask_is_low_ones_covering_n(n in 1u64..) {
            let mask = umask(n);
            // Form 2^k - 1.
            prop_assert_eq!(mask & mask.wrapping_add(1), 0);
            // Covers n, and is the smallest such mask.
            prop_assert!(mask >= n);
            prop_assert!(mask >> 1 < n);
        }

        #[test]
        fn prop_hash_matches_longhand(s in any::<u64>(), v in any::<u64>()) {
            prop_assert_eq!(hash(s, v), hash_longhand(s, v));
        }
    }
}
