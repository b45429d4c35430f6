//! Sampling Reports
//!
//! Derives runs of values from a [`Gen`] for inspection and export. Used by
//! the `pgen` binary; configuration comes from environment variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::generator::{Gen, GenError};

/// Generator accessor to sample with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    /// [`Gen::uint64`]
    #[default]
    Uint64,
    /// [`Gen::int64`]
    Int64,
    /// [`Gen::int32`]
    Int32,
    /// [`Gen::intn`], bounded by [`SampleConfig::bound`]
    Intn,
    /// [`Gen::float64`]
    Float64,
    /// [`Gen::float32`]
    Float32,
}

impl Accessor {
    /// All accessors, in declaration order.
    pub const ALL: [Accessor; 6] = [
        Accessor::Uint64,
        Accessor::Int64,
        Accessor::Int32,
        Accessor::Intn,
        Accessor::Float64,
        Accessor::Float32,
    ];

    /// Lowercase name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Accessor::Uint64 => "uint64",
            Accessor::Int64 => "int64",
            Accessor::Int32 => "int32",
            Accessor::Intn => "intn",
            Accessor::Float64 => "float64",
            Accessor::Float32 => "float32",
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Accessor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Accessor::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownAccessor(s.to_string()))
    }
}

/// A derived value, in the shape its accessor returns.
///
/// Serialized as a bare JSON number, so it is output-only: a non-negative
/// signed value reads back indistinguishable from an unsigned one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    /// From `uint64` or `intn`.
    Unsigned(u64),
    /// From `int64` or `int32`.
    Signed(i64),
    /// From `float64` or `float32` (widened).
    Float(f64),
}

/// One derived value and the index it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// Index passed to the accessor.
    pub index: i64,
    /// Value the accessor returned.
    pub value: SampleValue,
}

/// Sampling configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Generator seed.
    pub seed: i64,
    /// First index to sample.
    pub start: i64,
    /// Number of consecutive indices to sample.
    pub count: u32,
    /// Accessor to apply to each index.
    pub accessor: Accessor,
    /// Exclusive upper bound, used by `intn` only.
    pub bound: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            start: 1,
            count: 10,
            accessor: Accessor::Uint64,
            bound: 100,
        }
    }
}

impl SampleConfig {
    /// Create config from environment variables.
    ///
    /// Reads `PGEN_SEED`, `PGEN_START`, `PGEN_COUNT`, `PGEN_ACCESSOR` and
    /// `PGEN_BOUND`. Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = parse_var(&lookup, "PGEN_SEED")? {
            config.seed = seed;
        }
        if let Some(start) = parse_var(&lookup, "PGEN_START")? {
            config.start = start;
        }
        if let Some(count) = parse_var(&lookup, "PGEN_COUNT")? {
            config.count = count;
        }
        if let Some(accessor) = lookup("PGEN_ACCESSOR") {
            config.accessor = accessor.parse()?;
        }
        if let Some(bound) = parse_var(&lookup, "PGEN_BOUND")? {
            config.bound = bound;
        }

        Ok(config)
    }

    /// Generator for this config's seed.
    pub fn generator(&self) -> Gen {
        Gen::new(self.seed)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Variable is set but does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
    /// Accessor name not recognised.
    #[error("unknown accessor: {0:?}")]
    UnknownAccessor(String),
}

/// Derive a single sample.
///
/// `bound` is only consulted for [`Accessor::Intn`].
pub fn sample(gen: &Gen, accessor: Accessor, index: i64, bound: u64) -> Result<Sample, GenError> {
    let value = match accessor {
        Accessor::Uint64 => SampleValue::Unsigned(gen.uint64(index)?),
        Accessor::Int64 => SampleValue::Signed(gen.int64(index)?),
        Accessor::Int32 => SampleValue::Signed(gen.int32(index)? as i64),
        Accessor::Intn => SampleValue::Unsigned(gen.intn(index, bound)?),
        Accessor::Float64 => SampleValue::Float(gen.float64(index)?),
        Accessor::Float32 => SampleValue::Float(gen.float32(index)? as f64),
    };

    Ok(Sample { index, value })
}

/// Derive `config.count` consecutive samples starting at `config.start`.
///
/// Stops at the first index the accessor rejects. Indices that would pass
/// `i64::MAX` wrap negative and are rejected.
pub fn sample_range(config: &SampleConfig) -> Result<Vec<Sample>, GenError> {
    let gen = config.generator();

    let samples = (0..config.count as i64)
        .map(|offset| sample(&gen, config.accessor, config.start.wrapping_add(offset), config.bound))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        seed = config.seed,
        accessor = %config.accessor,
        start = config.start,
        count = samples.len(),
        "derived sample range"
    );

    Ok(samples)
}

// =============================================================================
// TESTS
// =============================================================================
