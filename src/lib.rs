//! Electron clouds of hydrogen-like atoms.
//!
//! Evaluates ψ_nlm for a single electron around a nucleus of charge Z and
//! samples |ψ|² into a finite set of points.
//!
//! ```
//! use hydrogen_cloud::{CloudSampler, QuantumState, SamplerConfig};
//!
//! let state = QuantumState::new(2, 1, 0, 1).unwrap();
//! let cloud = CloudSampler::new()
//!     .sample_seeded(&state, &SamplerConfig::default(), 42)
//!     .unwrap();
//! assert!(cloud.len() <= 1000);
//! ```

pub mod error;
pub mod logging;
pub mod physics;
pub mod request;
pub mod sampling;

pub use error::{CloudError, Result};
pub use physics::{
    QuantumState, Recurrence, SpecialFunctions, SphericalPoint, WavefunctionEvaluator,
    BOHR_RADIUS, MAX_NUCLEAR_CHARGE, MAX_PRINCIPAL_QUANTUM_NUMBER,
};
pub use request::{CloudJob, CloudQuery};
pub use sampling::{AcceptanceRule, CloudSampler, ElectronCloud, SamplerConfig};
