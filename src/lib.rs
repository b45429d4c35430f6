//! # pgen
//!
//! Deterministic generation of random-like values, addressed by index.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           PGEN                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/              - Deterministic primitives              │
//! │  ├── hash.rs        - FNV-1a byte cascade, bit masks        │
//! │  └── generator.rs   - Seeded, index-keyed accessors         │
//! │                                                             │
//! │  sample.rs          - Sample runs, env configuration        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! A [`Gen`] holds nothing but its seed. The value for index `i` is
//! `hash(hash(OFFSET_BASIS, seed), i)`, reshaped per accessor, so:
//! - No call depends on any earlier call
//! - Values can be looked up in any order, from any thread
//! - Identical (seed, index) pairs give identical values on every platform
//!
//! This is not a cryptographic generator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod sample;

// Re-export commonly used types
pub use crate::core::generator::{Gen, GenError};
pub use crate::sample::{Accessor, Sample, SampleConfig, SampleValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
