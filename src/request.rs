//! Resolves loosely typed request parameters into a validated sampling job.
//!
//! This is the boundary where untyped input (query strings, CLI arguments)
//! becomes a [`QuantumState`] and a [`SamplerConfig`]. Past this point the
//! sampler can assume valid quantum numbers.

use serde::Deserialize;

use crate::error::Result;
use crate::physics::{QuantumState, SpecialFunctions};
use crate::sampling::{AcceptanceRule, CloudSampler, SamplerConfig, DEFAULT_SAMPLE_TRIALS};

/// Upper bound on trials accepted from a request.
pub const MAX_SAMPLE_TRIALS: usize = 1_000_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudQuery {
    pub n: Option<i64>,
    pub l: Option<i64>,
    pub m: Option<i64>,
    #[serde(rename = "Z", alias = "z")]
    pub z: Option<i64>,
    /// Kept as text so a malformed value falls back to the default.
    #[serde(rename = "sampleSize")]
    pub sample_size: Option<String>,
    pub seed: Option<u64>,
    pub mode: Option<String>,
    pub cartesian: Option<bool>,
}

impl CloudQuery {
    pub fn resolve(&self) -> Result<CloudJob> {
        let state = QuantumState::new(
            self.n.unwrap_or(1),
            self.l.unwrap_or(0),
            self.m.unwrap_or(0),
            self.z.unwrap_or(1),
        )?;
        let config = SamplerConfig::default()
            .with_sample_trials(parse_sample_size(self.sample_size.as_deref()))
            .with_acceptance(AcceptanceRule::from_query(self.mode.as_deref()));

        Ok(CloudJob {
            state,
            config,
            seed: self.seed,
            cartesian: self.cartesian.unwrap_or(false),
        })
    }
}

/// Missing, unparsable or non-positive sizes fall back to the default;
/// oversized ones are capped at [`MAX_SAMPLE_TRIALS`].
pub fn parse_sample_size(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&size| size > 0)
        .map_or(DEFAULT_SAMPLE_TRIALS, |size| {
            usize::try_from(size).map_or(MAX_SAMPLE_TRIALS, |size| size.min(MAX_SAMPLE_TRIALS))
        })
}

/// A validated request, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudJob {
    pub state: QuantumState,
    pub config: SamplerConfig,
    /// Fixed seed for reproducible output; thread-local entropy otherwise.
    pub seed: Option<u64>,
    /// Emit (x, y, z) instead of (r, θ, φ).
    pub cartesian: bool,
}

impl CloudJob {
    /// Samples and flattens the cloud into coordinate triples.
    pub fn run<B: SpecialFunctions>(&self, sampler: &CloudSampler<B>) -> Result<Vec<[f64; 3]>> {
        let cloud = match self.seed {
            Some(seed) => sampler.sample_seeded(&self.state, &self.config, seed)?,
            None => sampler.sample(&self.state, &self.config, &mut rand::thread_rng())?,
        };

        Ok(if self.cartesian {
            cloud.to_cartesian()
        } else {
            cloud.triples()
        })
    }
}
