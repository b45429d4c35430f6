//! Index-Addressable Generator
//!
//! [`Gen`] maps an index to a random-looking value without advancing any
//! state. Given the same seed, every accessor returns identical results on
//! all platforms, in any call order, from any number of threads.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::hash::{derive, hash, umask};

/// Number of evenly spaced `f64` values drawn from for [`Gen::float64`].
pub const FLOAT64_STEPS: u64 = 1 << 53;

/// Number of evenly spaced `f32` values drawn from for [`Gen::float32`].
pub const FLOAT32_STEPS: u64 = 1 << 24;

const LOW_63: u64 = (1 << 63) - 1;
const LOW_31: u64 = (1 << 31) - 1;

/// Deterministic generator keyed by index.
///
/// # Determinism Guarantee
///
/// The value for index `i` depends only on the seed and `i`. Nothing is
/// cached or mutated, so lookups can happen out of order or in parallel.
///
/// # Example
///
/// ```
/// use pgen::Gen;
///
/// let gen = Gen::new(42);
/// assert_eq!(gen.uint64(1).unwrap(), 11479527560254063790); // Always the same!
/// assert!(gen.intn(1, 10).unwrap() < 10);
/// assert!(gen.uint64(-1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gen {
    seed: i64,
}

impl From<i64> for Gen {
    fn from(seed: i64) -> Self {
        Self::new(seed)
    }
}

impl Gen {
    /// Create a generator from a seed.
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }

    /// The seed this generator was built from.
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// Raw derived value for index `i`, in `[0, 2^64-1]`.
    pub fn uint64(&self, i: i64) -> Result<u64, GenError> {
        check_non_negative("uint64", i)?;
        Ok(derive(self.seed, i))
    }

    /// Value for index `i` in `[0, 2^63-1]`.
    ///
    /// The top bit is XOR-folded into the low 63 bits.
    pub fn int64(&self, i: i64) -> Result<i64, GenError> {
        check_non_negative("int64", i)?;
        let v = derive(self.seed, i);
        Ok(((v >> 63) ^ (v & LOW_63)) as i64)
    }

    /// Value for index `i` in `[0, 2^31-1]`.
    ///
    /// Bits above 31 are XOR-folded into the low 31 bits, and the result is
    /// kept to 31 bits so it is never negative.
    pub fn int32(&self, i: i64) -> Result<i32, GenError> {
        check_non_negative("int32", i)?;
        let v = derive(self.seed, i);
        Ok((((v >> 31) ^ (v & LOW_31)) & LOW_31) as i32)
    }

    /// Value for index `i` in `[0, n)`.
    ///
    /// Uses power-of-two rejection sampling, so there is no modulo bias.
    /// Index 0 is rejected here and by the float accessors built on it.
    pub fn intn(&self, i: i64, n: u64) -> Result<u64, GenError> {
        check_positive("intn", i)?;
        if n == 0 {
            return Err(GenError::EmptyRange { op: "intn" });
        }
        Ok(self.bounded(i, n))
    }

    /// Value for index `i` in `[0, 1)`.
    ///
    /// There are 2^53 evenly spaced doubles in `[0, 1)` at this resolution;
    /// one of them is picked uniformly. Like [`Gen::intn`], index 0 is
    /// rejected.
    pub fn float64(&self, i: i64) -> Result<f64, GenError> {
        check_positive("float64", i)?;
        Ok(self.bounded(i, FLOAT64_STEPS) as f64 / FLOAT64_STEPS as f64)
    }

    /// Value for index `i` in `[0, 1)`, single precision. Index 0 is rejected.
    pub fn float32(&self, i: i64) -> Result<f32, GenError> {
        check_positive("float32", i)?;
        Ok(self.bounded(i, FLOAT32_STEPS) as f32 / FLOAT32_STEPS as f32)
    }

    /// Sequential stream anchored to index `i`.
    ///
    /// Seeded from [`Gen::int64`]. Only the seeding is pinned here; the
    /// values the stream yields are whatever `StdRng` produces for that seed.
    pub fn rand(&self, i: i64) -> Result<StdRng, GenError> {
        let seed = self.int64(i)?;
        trace!(gen_seed = self.seed, index = i, stream_seed = seed, "seeding stream");
        Ok(StdRng::seed_from_u64(seed as u64))
    }

    /// Rejection sampler shared by `intn` and the float accessors.
    ///
    /// A rejected draw is re-hashed with `n` as the input word, using the
    /// previous value as the running state. `n` must be non-zero.
    ///
    /// The masked bits of a re-hash depend only on the masked bits of the
    /// rejected draw, so rejects land on a fixed handful of values.
    fn bounded(&self, i: i64, n: u64) -> u64 {
        debug_assert!(n > 0, "bounded draw from an empty range");
        let mask = umask(n);
        let mut v = derive(self.seed, i);

        while v & mask >= n {
            v = hash(v, n);
        }

        v & mask
    }
}

#[inline]
fn check_non_negative(op: &'static str, index: i64) -> Result<(), GenError> {
    if index < 0 {
        Err(GenError::InvalidIndex { op, index })
    } else {
        Ok(())
    }
}

#[inline]
fn check_positive(op: &'static str, index: i64) -> Result<(), GenError> {
    if index <= 0 {
        Err(GenError::InvalidIndex { op, index })
    } else {
        Ok(())
    }
}

/// Generator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GenError {
    /// Index outside the accessor's domain.
    #[error("invalid argument to {op}: index {index}")]
    InvalidIndex {
        /// Accessor that rejected the index.
        op: &'static str,
        /// The rejected index.
        index: i64,
    },

    /// Upper bound of zero leaves nothing to sample.
    #[error("invalid argument to {op}: empty range")]
    EmptyRange {
        /// Accessor that rejected the bound.
        op: &'static str,
    },
}

// =============================================================================
// TESTS
// =============================================================================
