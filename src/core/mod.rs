//! Core deterministic primitives.
//!
//! Everything here is a pure function of its inputs. Outputs are pinned
//! bit-for-bit and form the compatibility surface of the crate.

pub mod hash;
pub mod generator;

// Re-export core types
pub use generator::{Gen, GenError, FLOAT32_STEPS, FLOAT64_STEPS};
pub use hash::{derive, hash, umask, OFFSET_BASIS, PRIME};
