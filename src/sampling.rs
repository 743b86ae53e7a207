//! Monte Carlo sampling of |ψ|² into an electron cloud.
//!
//! Candidates are drawn uniformly in (r, θ, φ), not uniformly in volume, and
//! the default rule accepts a candidate when |ψ|² (in m⁻³) exceeds a fixed
//! threshold. Both are part of the observable contract: the threshold is not
//! rescaled per orbital. [`AcceptanceRule::Normalized`] is the opt-in
//! alternative that accepts in proportion to |ψ|² / max|ψ|².

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use tracing::{debug, info, trace};

use crate::error::{CloudError, Result};
use crate::physics::{
    QuantumState, Recurrence, SpecialFunctions, SphericalPoint, WavefunctionEvaluator,
    BOHR_RADIUS,
};

pub const DEFAULT_SAMPLE_TRIALS: usize = 1000;
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.9;
/// Default sampling radius in units of the Bohr radius.
pub const DEFAULT_RADIUS_BOHR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptanceRule {
    /// Accept when |ψ|² > `density_threshold`.
    #[default]
    Threshold,
    /// Accept with probability |ψ|² / max|ψ|² over the sampling region.
    Normalized,
}

impl AcceptanceRule {
    pub fn from_query(value: Option<&str>) -> Self {
        match value.unwrap_or("threshold").to_lowercase().as_str() {
            "normalized" => AcceptanceRule::Normalized,
            _ => AcceptanceRule::Threshold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptanceRule::Threshold => "threshold",
            AcceptanceRule::Normalized => "normalized",
        }
    }
}

/// Per-call sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of candidate points drawn. The cloud holds at most this many.
    pub sample_trials: usize,
    /// Upper bound on r, in meters.
    pub radius_bound: f64,
    /// Minimum |ψ|² (m⁻³) for the threshold rule.
    pub density_threshold: f64,
    pub acceptance: AcceptanceRule,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            sample_trials: DEFAULT_SAMPLE_TRIALS,
            radius_bound: DEFAULT_RADIUS_BOHR * BOHR_RADIUS,
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            acceptance: AcceptanceRule::Threshold,
        }
    }
}

impl SamplerConfig {
    #[must_use]
    pub fn with_sample_trials(mut self, sample_trials: usize) -> Self {
        self.sample_trials = sample_trials;
        self
    }

    #[must_use]
    pub fn with_radius_bound(mut self, radius_bound: f64) -> Self {
        self.radius_bound = radius_bound;
        self
    }

    #[must_use]
    pub fn with_density_threshold(mut self, density_threshold: f64) -> Self {
        self.density_threshold = density_threshold;
        self
    }

    #[must_use]
    pub fn with_acceptance(mut self, acceptance: AcceptanceRule) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius_bound.is_finite() || self.radius_bound <= 0.0 {
            return Err(CloudError::SamplingParameterError {
                parameter: "radius_bound",
                value: self.radius_bound,
                reason: "must be a positive finite length",
            });
        }
        if self.density_threshold.is_nan() || self.density_threshold < 0.0 {
            return Err(CloudError::SamplingParameterError {
                parameter: "density_threshold",
                value: self.density_threshold,
                reason: "must be non-negative",
            });
        }
        Ok(())
    }
}

/// Accepted points in acceptance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ElectronCloud {
    points: Vec<SphericalPoint>,
}

impl ElectronCloud {
    pub fn points(&self) -> &[SphericalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SphericalPoint> {
        self.points.iter()
    }

    /// (r, θ, φ) triples.
    pub fn triples(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(SphericalPoint::to_triple).collect()
    }

    /// (x, y, z) triples in meters.
    pub fn to_cartesian(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(SphericalPoint::to_cartesian).collect()
    }
}

impl IntoIterator for ElectronCloud {
    type Item = SphericalPoint;
    type IntoIter = std::vec::IntoIter<SphericalPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElectronCloud {
    type Item = &'a SphericalPoint;
    type IntoIter = std::slice::Iter<'a, SphericalPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Drives a [`WavefunctionEvaluator`] over random candidates.
#[derive(Debug, Clone, Default)]
pub struct CloudSampler<B = Recurrence> {
    evaluator: WavefunctionEvaluator<B>,
}

impl CloudSampler<Recurrence> {
    pub fn new() -> Self {
        CloudSampler {
            evaluator: WavefunctionEvaluator::new(),
        }
    }
}

impl<B: SpecialFunctions> CloudSampler<B> {
    pub fn with_evaluator(evaluator: WavefunctionEvaluator<B>) -> Self {
        CloudSampler { evaluator }
    }

    pub fn evaluator(&self) -> &WavefunctionEvaluator<B> {
        &self.evaluator
    }

    /// Runs exactly `config.sample_trials` trials and returns the accepted
    /// points. Parameters are validated before the first trial.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        state: &QuantumState,
        config: &SamplerConfig,
        rng: &mut R,
    ) -> Result<ElectronCloud> {
        config.validate()?;

        debug!(
            orbital = %state.label(),
            m = state.m(),
            z = state.z(),
            trials = config.sample_trials,
            rule = config.acceptance.as_str(),
            "sampling electron cloud"
        );

        if config.sample_trials == 0 {
            return Ok(ElectronCloud::default());
        }

        let envelope = match config.acceptance {
            AcceptanceRule::Threshold => None,
            AcceptanceRule::Normalized => Some(self.max_density(state, config.radius_bound)),
        };

        let mut points = Vec::new();
        for _ in 0..config.sample_trials {
            let point = draw_point(rng, config.radius_bound);
            let density = self.evaluator.probability_density(&point, state);

            let accepted = match envelope {
                None => density > config.density_threshold,
                Some(max_density) => rng.gen::<f64>() * max_density < density,
            };
            if accepted {
                points.push(point);
            }
        }

        info!(
            orbital = %state.label(),
            trials = config.sample_trials,
            accepted = points.len(),
            "electron cloud sampled"
        );

        Ok(ElectronCloud { points })
    }

    /// [`Self::sample`] with a `StdRng` seeded from `seed`.
    pub fn sample_seeded(
        &self,
        state: &QuantumState,
        config: &SamplerConfig,
        seed: u64,
    ) -> Result<ElectronCloud> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample(state, config, &mut rng)
    }

    /// Validates raw quantum numbers, then samples. Invalid numbers fail
    /// before any trial runs.
    pub fn sample_quantum_numbers<R: Rng + ?Sized>(
        &self,
        (n, l, m, z): (i64, i64, i64, i64),
        config: &SamplerConfig,
        rng: &mut R,
    ) -> Result<ElectronCloud> {
        let state = QuantumState::new(n, l, m, z)?;
        self.sample(&state, config, rng)
    }

    /// Approximate max |ψ|² inside `radius_bound`.
    /// Scans a 2D (r, theta) grid with quadratic r-spacing, dense near the
    /// nucleus where s-type orbitals peak. |ψ|² does not depend on phi.
    pub fn max_density(&self, state: &QuantumState, radius_bound: f64) -> f64 {
        let r_steps = 200;
        let theta_steps = 90;
        let mut max_density = 0.0_f64;

        for i in 0..r_steps {
            let t = (i as f64 + 1.0) / r_steps as f64;
            let r = radius_bound * t * t;
            for j in 0..=theta_steps {
                let theta = j as f64 / theta_steps as f64 * PI;
                let density = self
                    .evaluator
                    .probability_density(&SphericalPoint::new(r, theta, 0.0), state);
                max_density = max_density.max(density);
            }
        }

        let near_nucleus = self
            .evaluator
            .probability_density(&SphericalPoint::new(radius_bound * 1e-6, 0.0, 0.0), state);
        max_density = max_density.max(near_nucleus);

        trace!(orbital = %state.label(), max_density, "density envelope");
        max_density.max(f64::MIN_POSITIVE)
    }
}

fn draw_point<R: Rng + ?Sized>(rng: &mut R, radius_bound: f64) -> SphericalPoint {
    let r = rng.gen_range(0.0..=radius_bound);
    let theta = rng.gen_range(0.0..=PI);
    let phi = rng.gen_range(0.0..TAU);
    SphericalPoint::new(r, theta, phi)
}
