//! Hydrogen-like orbital wavefunctions
//! ψ_nlm(r, θ, φ) = C · R_nl(r) · Y_lm(θ, φ) for one electron bound to a nucleus of charge Z.

use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

use crate::error::{CloudError, Result};

/// Bohr radius in meters. All radial distances are SI lengths.
pub const BOHR_RADIUS: f64 = 5.291772108e-11;

/// Largest accepted n. Keeps (n+l)! finite in f64 and bounds the per-point
/// recurrence work.
pub const MAX_PRINCIPAL_QUANTUM_NUMBER: i64 = 64;
/// Largest accepted Z (oganesson).
pub const MAX_NUCLEAR_CHARGE: i64 = 118;

/// Validated quantum numbers (n, l, m) and nuclear charge Z.
/// n: Principal quantum number (1, 2, 3, ...)
/// l: Orbital quantum number (0 to n-1)
/// m: Magnetic quantum number (-l to l)
/// z: Nuclear charge (1 for hydrogen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantumState {
    n: u32,
    l: u32,
    m: i32,
    z: u32,
}

impl QuantumState {
    /// Builds a state from raw integers, checking every invariant once.
    pub fn new(n: i64, l: i64, m: i64, z: i64) -> Result<Self> {
        let invalid = |reason| CloudError::InvalidQuantumState { n, l, m, z, reason };

        if n < 1 {
            return Err(invalid("n must be at least 1"));
        }
        if n > MAX_PRINCIPAL_QUANTUM_NUMBER {
            return Err(invalid("n must be at most 64"));
        }
        if l < 0 || l >= n {
            return Err(invalid("l must lie in [0, n-1]"));
        }
        if m < -l || m > l {
            return Err(invalid("m must lie in [-l, l]"));
        }
        if z < 1 {
            return Err(invalid("Z must be at least 1"));
        }
        if z > MAX_NUCLEAR_CHARGE {
            return Err(invalid("Z must be at most 118"));
        }

        // all four are bounded by the checks above
        Ok(QuantumState {
            n: n as u32,
            l: l as u32,
            m: m as i32,
            z: z as u32,
        })
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    /// Spectroscopic label such as `1s`, `2p` or `3d`.
    pub fn label(&self) -> String {
        const SUBSHELLS: &[u8] = b"spdfghiklmnoqrtuvwxyz";
        match SUBSHELLS.get(self.l as usize) {
            Some(&c) => format!("{}{}", self.n, c as char),
            None => format!("{}[l={}]", self.n, self.l),
        }
    }
}

/// A point in spherical coordinates: `r` in meters, polar angle `theta` in
/// [0, π], azimuthal angle `phi` in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphericalPoint {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

impl SphericalPoint {
    pub fn new(r: f64, theta: f64, phi: f64) -> Self {
        SphericalPoint { r, theta, phi }
    }

    pub fn to_triple(&self) -> [f64; 3] {
        [self.r, self.theta, self.phi]
    }

    pub fn to_cartesian(&self) -> [f64; 3] {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        [
            self.r * sin_theta * cos_phi,
            self.r * sin_theta * sin_phi,
            self.r * cos_theta,
        ]
    }
}

/// Numeric backend for the two special functions the wavefunction needs.
///
/// Implementations must return orthonormal spherical harmonics, since the
/// radial normalization in [`WavefunctionEvaluator::normalization_constant`]
/// assumes ∫|Y|² dΩ = 1.
pub trait SpecialFunctions {
    /// Generalized Laguerre polynomial L^alpha_degree(x).
    fn radial_polynomial(&self, degree: u32, alpha: u32, x: f64) -> f64;

    /// Complex spherical harmonic Y_lm at polar angle `theta` and azimuth `phi`.
    fn spherical_harmonic(&self, l: u32, m: i32, theta: f64, phi: f64) -> Complex64;
}

/// Three-term recurrence backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recurrence;

impl SpecialFunctions for Recurrence {
    fn radial_polynomial(&self, degree: u32, alpha: u32, x: f64) -> f64 {
        laguerre_polynomial(x, degree, alpha)
    }

    fn spherical_harmonic(&self, l: u32, m: i32, theta: f64, phi: f64) -> Complex64 {
        spherical_harmonic(l, m, theta, phi)
    }
}

/// Evaluates ψ for a [`QuantumState`] at a [`SphericalPoint`].
#[derive(Debug, Clone, Default)]
pub struct WavefunctionEvaluator<B = Recurrence> {
    backend: B,
}

impl WavefunctionEvaluator<Recurrence> {
    pub fn new() -> Self {
        WavefunctionEvaluator {
            backend: Recurrence,
        }
    }
}

impl<B: SpecialFunctions> WavefunctionEvaluator<B> {
    pub fn with_backend(backend: B) -> Self {
        WavefunctionEvaluator { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unnormalized radial function exp(-ρ/2) · ρ^l · L^(2l+1)_(n-l-1)(ρ)
    /// with ρ = 2Zr / (n a0). The sign of the polynomial is kept.
    pub fn radial_part(&self, r: f64, n: u32, l: u32, z: u32) -> Result<f64> {
        check_radial_numbers(n, l, z)?;
        Ok(self.radial_unchecked(r, n, l, z))
    }

    /// C = sqrt((2Z / (n a0))^3 · (n-l-1)! / (2n (n+l)!))
    ///
    /// The Z³ inside the cube keeps ∫|ψ|² dV = 1 for any Z; a formula with
    /// (2 / (n a0))³ agrees only at Z = 1.
    pub fn normalization_constant(&self, n: u32, l: u32, z: u32) -> Result<f64> {
        check_radial_numbers(n, l, z)?;
        Ok(normalization_unchecked(n, l, z))
    }

    /// Y_lm(theta, phi). An out-of-range (l, m) is reported against the
    /// smallest n that admits l.
    pub fn angular_part(&self, l: u32, m: i32, theta: f64, phi: f64) -> Result<Complex64> {
        QuantumState::new(i64::from(l) + 1, l.into(), m.into(), 1)?;
        Ok(self.backend.spherical_harmonic(l, m, theta, phi))
    }

    pub fn evaluate(&self, point: &SphericalPoint, state: &QuantumState) -> Complex64 {
        let c = normalization_unchecked(state.n, state.l, state.z);
        let radial = self.radial_unchecked(point.r, state.n, state.l, state.z);
        let angular = self
            .backend
            .spherical_harmonic(state.l, state.m, point.theta, point.phi);
        angular * (c * radial)
    }

    /// |ψ|² in m⁻³.
    pub fn probability_density(&self, point: &SphericalPoint, state: &QuantumState) -> f64 {
        self.evaluate(point, state).norm_sqr()
    }

    fn radial_unchecked(&self, r: f64, n: u32, l: u32, z: u32) -> f64 {
        let rho = 2.0 * f64::from(z) * r / (f64::from(n) * BOHR_RADIUS);

        let exp_part = (-rho / 2.0).exp();
        let rho_power = rho.powi(l as i32);
        let poly = self.backend.radial_polynomial(n - l - 1, 2 * l + 1, rho);

        exp_part * rho_power * poly
    }
}

fn check_radial_numbers(n: u32, l: u32, z: u32) -> Result<()> {
    QuantumState::new(n.into(), l.into(), 0, z.into()).map(|_| ())
}

fn normalization_unchecked(n: u32, l: u32, z: u32) -> f64 {
    let n_f = f64::from(n);
    let scale = (2.0 * f64::from(z) / (n_f * BOHR_RADIUS)).powi(3);
    let (n, l) = (u64::from(n), u64::from(l));
    (scale * factorial(n - l - 1) / (2.0 * n_f * factorial(n + l))).sqrt()
}

/// Orthonormal complex spherical harmonic with the Condon-Shortley phase.
/// `theta` is the polar angle, `phi` the azimuth.
pub(crate) fn spherical_harmonic(l: u32, m: i32, theta: f64, phi: f64) -> Complex64 {
    let m_abs = m.unsigned_abs();
    if m_abs > l {
        return Complex64::new(0.0, 0.0);
    }

    let legendre = associated_legendre(theta.cos(), l, m_abs);
    let (l_u, m_u) = (u64::from(l), u64::from(m_abs));
    let norm = ((2.0 * f64::from(l) + 1.0) / (4.0 * PI) * factorial(l_u - m_u)
        / factorial(l_u + m_u))
    .sqrt();
    let positive = Complex64::from_polar(norm * legendre, f64::from(m_abs) * phi);

    // Y_l,-m = (-1)^m conj(Y_l,m)
    if m >= 0 {
        positive
    } else if m_abs % 2 == 0 {
        positive.conj()
    } else {
        -positive.conj()
    }
}

/// n! as an exact integer, while it fits in a u64 (n <= 20).
pub fn exact_factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// n! as a float. Exact integer arithmetic where possible, f64 product
/// beyond; infinite past 170!.
pub fn factorial(n: u64) -> f64 {
    match exact_factorial(n) {
        Some(exact) => exact as f64,
        None => float_factorial(n),
    }
}

fn float_factorial(n: u64) -> f64 {
    if n > 170 {
        return f64::INFINITY;
    }
    (1..=n).map(|k| k as f64).product()
}

/// Associated Legendre function P^m_l(x), Condon-Shortley phase included.
/// Climbs in l from P^m_m, seeding P^m_(m-1) = 0.
pub(crate) fn associated_legendre(x: f64, l: u32, m: u32) -> f64 {
    if m > l {
        return 0.0;
    }

    // P^m_m = (-1)^m (2m-1)!! (1-x²)^(m/2)
    let sin_theta = (1.0 - x * x).max(0.0).sqrt();
    let p_mm = (1..=m).fold(1.0, |p, i| -p * (2.0 * f64::from(i) - 1.0) * sin_theta);

    let m_f = f64::from(m);
    let (_, p_lm) = (m + 1..=l).fold((0.0, p_mm), |(below, current), i| {
        let i = f64::from(i);
        let next = ((2.0 * i - 1.0) * x * current - (i + m_f - 1.0) * below) / (i - m_f);
        (current, next)
    });
    p_lm
}

/// Generalized Laguerre polynomial L^alpha_k(x).
/// Climbs from L_0 = 1, seeding L_(-1) = 0.
pub(crate) fn laguerre_polynomial(x: f64, k: u32, alpha: u32) -> f64 {
    let alpha = f64::from(alpha);
    let (_, l_k) = (1..=k).fold((0.0, 1.0), |(below, current), i| {
        let i = f64::from(i);
        let next = ((2.0 * i - 1.0 + alpha - x) * current - (i - 1.0 + alpha) * below) / i;
        (current, next)
    });
    l_k
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(n: i64, l: i64, m: i64, z: i64) -> QuantumState {
        QuantumState::new(n, l, m, z).unwrap()
    }

    /// Composite Simpson rule over [a, b] with an even number of intervals.
    fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, intervals: usize) -> f64 {
        let h = (b - a) / intervals as f64;
        let mut sum = f(a) + f(b);
        for i in 1..intervals {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * f(a + i as f64 * h);
        }
        sum * h / 3.0
    }

    #[test]
    fn test_quantum_state_bounds() {
        assert!(QuantumState::new(1, 0, 0, 1).is_ok());
        assert!(QuantumState::new(2, 1, -1, 1).is_ok());
        assert!(QuantumState::new(2, 1, 0, 1).is_ok());
        assert!(QuantumState::new(3, 2, 2, 3).is_ok());

        assert!(QuantumState::new(0, 0, 0, 1).is_err());
        assert!(QuantumState::new(2, 2, 0, 1).is_err());
        assert!(QuantumState::new(2, 1, 2, 1).is_err());
        assert!(QuantumState::new(2, 1, -2, 1).is_err());
        assert!(QuantumState::new(2, -1, 0, 1).is_err());
        assert!(QuantumState::new(1, 0, 0, 0).is_err());
        assert!(QuantumState::new(-1, 0, 0, 1).is_err());
        assert!(QuantumState::new(2, 1, i64::MIN, 1).is_err());
    }

    #[test]
    fn test_quantum_state_upper_limits() {
        assert!(QuantumState::new(64, 63, -63, 118).is_ok());
        assert!(QuantumState::new(65, 0, 0, 1).is_err());
        assert!(QuantumState::new(1, 0, 0, 119).is_err());
        assert!(QuantumState::new(4_000_000_000, 3_999_999_999, 0, 1).is_err());
        assert!(QuantumState::new(20_000_000, 0, 0, 1).is_err());
        assert!(QuantumState::new(i64::MAX, 0, 0, i64::MAX).is_err());
    }

    #[test]
    fn test_largest_states_stay_finite() {
        let eval = WavefunctionEvaluator::new();
        for (n, l, m, z) in [(64, 0, 0, 1), (64, 63, -63, 118), (64, 32, 17, 118)] {
            let s = state(n, l, m, z);
            let c = eval
                .normalization_constant(s.n(), s.l(), s.z())
                .unwrap();
            assert!(c.is_finite() && c > 0.0, "C = {c} for {n} {l} {m} {z}");
            let psi = eval.evaluate(&SphericalPoint::new(BOHR_RADIUS, 1.0, 2.0), &s);
            assert!(psi.re.is_finite() && psi.im.is_finite(), "psi = {psi}");
        }
    }

    #[test]
    fn test_raw_entry_points_reject_huge_numbers() {
        let eval = WavefunctionEvaluator::new();
        assert!(eval.normalization_constant(4_000_000_000, 3_999_999_999, 1).is_err());
        assert!(eval.radial_part(BOHR_RADIUS, u32::MAX, u32::MAX - 1, 1).is_err());
        assert!(eval.angular_part(u32::MAX, 0, 1.0, 1.0).is_err());
        assert!(eval.angular_part(1, 2, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_invalid_state_reports_inputs() {
        let err = QuantumState::new(2, 2, 0, 1).unwrap_err();
        match err {
            CloudError::InvalidQuantumState { n, l, m, z, .. } => {
                assert_eq!((n, l, m, z), (2, 2, 0, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(state(1, 0, 0, 1).label(), "1s");
        assert_eq!(state(2, 1, -1, 1).label(), "2p");
        assert_eq!(state(3, 2, 0, 1).label(), "3d");
        assert_eq!(state(5, 4, 0, 1).label(), "5g");
    }

    #[test]
    fn test_factorial() {
        assert_eq!(exact_factorial(0), Some(1));
        assert_eq!(exact_factorial(1), Some(1));
        assert_eq!(exact_factorial(5), Some(120));
        assert_eq!(exact_factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(exact_factorial(21), None);
        assert_eq!(factorial(5), 120.0);
    }

    #[test]
    fn test_float_factorial_agrees_with_exact() {
        for n in 0..=20 {
            let exact = exact_factorial(n).unwrap() as f64;
            let float = float_factorial(n);
            assert!(((exact - float) / exact).abs() < 1e-14, "n = {n}");
        }
        let big = factorial(25);
        assert!((big / 1.551_121_004_333_099e25 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_laguerre_closed_forms() {
        for &x in &[0.0, 0.5, 1.0, 3.7] {
            assert_eq!(laguerre_polynomial(x, 0, 3), 1.0);
            assert!((laguerre_polynomial(x, 1, 3) - (4.0 - x)).abs() < 1e-12);
            // L^1_2(x) = x^2/2 - 3x + 3
            let expected = x * x / 2.0 - 3.0 * x + 3.0;
            assert!((laguerre_polynomial(x, 2, 1) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_legendre_closed_forms() {
        let x: f64 = 0.3;
        let s = (1.0 - x * x).sqrt();
        assert_eq!(associated_legendre(x, 0, 0), 1.0);
        assert!((associated_legendre(x, 1, 0) - x).abs() < 1e-12);
        assert!((associated_legendre(x, 2, 0) - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-12);
        let p3 = (5.0 * x.powi(3) - 3.0 * x) / 2.0;
        assert!((associated_legendre(x, 3, 0) - p3).abs() < 1e-12);
        assert!((associated_legendre(x, 1, 1) + s).abs() < 1e-12);
        assert!((associated_legendre(x, 2, 1) + 3.0 * x * s).abs() < 1e-12);
        assert!((associated_legendre(x, 2, 2) - 3.0 * (1.0 - x * x)).abs() < 1e-12);
        assert!((associated_legendre(x, 3, 3) + 15.0 * s.powi(3)).abs() < 1e-12);
        assert_eq!(associated_legendre(x, 1, 2), 0.0);
    }

    #[test]
    fn test_radial_part_at_origin() {
        let eval = WavefunctionEvaluator::new();
        for n in 1..=4 {
            for l in 0..n {
                let value = eval.radial_part(0.0, n, l, 1).unwrap();
                if l == 0 {
                    assert!(value.is_finite() && value != 0.0, "n={n} l={l}");
                } else {
                    assert_eq!(value, 0.0, "n={n} l={l}");
                }
            }
        }
    }

    #[test]
    fn test_radial_part_rejects_bad_numbers() {
        let eval = WavefunctionEvaluator::new();
        assert!(eval.radial_part(BOHR_RADIUS, 2, 2, 1).is_err());
        assert!(eval.radial_part(BOHR_RADIUS, 0, 0, 1).is_err());
        assert!(eval.normalization_constant(1, 0, 0).is_err());
        assert!(eval.normalization_constant(3, 3, 1).is_err());
    }

    #[test]
    fn test_radial_part_keeps_sign() {
        // 2s has a node at r = 2 a0 and is negative beyond it
        let eval = WavefunctionEvaluator::new();
        assert!(eval.radial_part(BOHR_RADIUS, 2, 0, 1).unwrap() > 0.0);
        assert!(eval.radial_part(3.0 * BOHR_RADIUS, 2, 0, 1).unwrap() < 0.0);
        assert!(eval.radial_part(2.0 * BOHR_RADIUS, 2, 0, 1).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_ground_state_normalization() {
        let eval = WavefunctionEvaluator::new();
        let ground = state(1, 0, 0, 1);
        let integral = simpson(
            |s| {
                let r = s * BOHR_RADIUS;
                let density = eval.probability_density(&SphericalPoint::new(r, 0.7, 1.3), &ground);
                4.0 * PI * r * r * density * BOHR_RADIUS
            },
            0.0,
            40.0,
            4000,
        );
        assert!((integral - 1.0).abs() < 0.01, "integral = {integral}");
    }

    #[test]
    fn test_radial_normalization_up_to_n3() {
        let eval = WavefunctionEvaluator::new();
        for z in [1, 2] {
            for n in 1..=3 {
                for l in 0..n {
                    let c = eval.normalization_constant(n, l, z).unwrap();
                    let integral = simpson(
                        |s| {
                            let r = s * BOHR_RADIUS;
                            let radial = c * eval.radial_part(r, n, l, z).unwrap();
                            r * r * radial * radial * BOHR_RADIUS
                        },
                        0.0,
                        80.0,
                        8000,
                    );
                    assert!(
                        (integral - 1.0).abs() < 0.01,
                        "n={n} l={l} Z={z} integral = {integral}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_spherical_harmonic_values() {
        let y00 = spherical_harmonic(0, 0, 1.1, 2.2);
        assert!((y00.re - 1.0 / (4.0 * PI).sqrt()).abs() < 1e-12);
        assert!(y00.im.abs() < 1e-12);

        let edge = (3.0 / (8.0 * PI)).sqrt();
        let y11 = spherical_harmonic(1, 1, PI / 2.0, 0.0);
        assert!((y11.re + edge).abs() < 1e-12);
        let y1m1 = spherical_harmonic(1, -1, PI / 2.0, 0.0);
        assert!((y1m1.re - edge).abs() < 1e-12);
    }

    #[test]
    fn test_angle_order_is_polar_then_azimuth() {
        let eval = WavefunctionEvaluator::new();
        // Y_10 depends only on the polar angle: maximal on the z axis whatever phi is
        let on_axis = eval.angular_part(1, 0, 0.0, PI / 2.0).unwrap();
        assert!((on_axis.re - (3.0 / (4.0 * PI)).sqrt()).abs() < 1e-12);
        let in_plane = eval.angular_part(1, 0, PI / 2.0, 0.0).unwrap();
        assert!(in_plane.norm() < 1e-12);
    }

    #[test]
    fn test_spherical_harmonics_are_normalized() {
        let theta_steps = 200;
        let phi_steps = 64;
        let d_theta = PI / theta_steps as f64;
        let d_phi = 2.0 * PI / phi_steps as f64;
        for l in 0..=3u32 {
            for m in -(l as i32)..=(l as i32) {
                let mut total = 0.0;
                for i in 0..theta_steps {
                    let theta = (i as f64 + 0.5) * d_theta;
                    for j in 0..phi_steps {
                        let phi = j as f64 * d_phi;
                        total += spherical_harmonic(l, m, theta, phi).norm_sqr()
                            * theta.sin()
                            * d_theta
                            * d_phi;
                    }
                }
                assert!((total - 1.0).abs() < 1e-3, "l={l} m={m} total={total}");
            }
        }
    }

    #[test]
    fn test_evaluate_composes_parts() {
        let eval = WavefunctionEvaluator::new();
        let s = state(3, 2, -1, 1);
        let point = SphericalPoint::new(2.5 * BOHR_RADIUS, 0.8, 4.0);
        let expected = eval.angular_part(2, -1, 0.8, 4.0).unwrap()
            * (eval.normalization_constant(3, 2, 1).unwrap()
                * eval.radial_part(point.r, 3, 2, 1).unwrap());
        let psi = eval.evaluate(&point, &s);
        assert!((psi - expected).norm() <= 1e-12 * expected.norm());
    }

    #[test]
    fn test_to_cartesian() {
        let [x, y, z] = SphericalPoint::new(2.0, PI / 2.0, PI / 2.0).to_cartesian();
        assert!(x.abs() < 1e-12);
        assert!((y - 2.0).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    /// Hand-written L and Y for n <= 2.
    struct ClosedForm;

    impl SpecialFunctions for ClosedForm {
        fn radial_polynomial(&self, degree: u32, alpha: u32, x: f64) -> f64 {
            match degree {
                0 => 1.0,
                1 => 1.0 + f64::from(alpha) - x,
                _ => unimplemented!("degree {degree}"),
            }
        }

        fn spherical_harmonic(&self, l: u32, m: i32, theta: f64, phi: f64) -> Complex64 {
            match (l, m) {
                (0, 0) => Complex64::new(0.5 / PI.sqrt(), 0.0),
                (1, 0) => Complex64::new((3.0 / (4.0 * PI)).sqrt() * theta.cos(), 0.0),
                (1, 1) | (1, -1) => {
                    let sign = -f64::from(m);
                    let magnitude = sign * (3.0 / (8.0 * PI)).sqrt() * theta.sin();
                    Complex64::from_polar(magnitude, f64::from(m) * phi)
                }
                _ => unimplemented!("l={l} m={m}"),
            }
        }
    }

    #[test]
    fn test_backends_agree_on_low_states() {
        let recurrence = WavefunctionEvaluator::new();
        let closed = WavefunctionEvaluator::with_backend(ClosedForm);

        assert_eq!(closed.backend().radial_polynomial(1, 3, 0.5), 3.5);
        assert_eq!(
            recurrence.backend().radial_polynomial(1, 3, 0.5),
            closed.backend().radial_polynomial(1, 3, 0.5)
        );

        let points = [
            SphericalPoint::new(0.3 * BOHR_RADIUS, 0.4, 5.9),
            SphericalPoint::new(BOHR_RADIUS, PI / 2.0, 1.0),
            SphericalPoint::new(3.7 * BOHR_RADIUS, 2.9, 3.3),
        ];
        for (n, l, m) in [(1, 0, 0), (2, 0, 0), (2, 1, -1), (2, 1, 0), (2, 1, 1)] {
            let s = state(n, l, m, 2);
            for point in &points {
                let expected = closed.evaluate(point, &s);
                let psi = recurrence.evaluate(point, &s);
                assert!(
                    (psi - expected).norm() <= 1e-12 * expected.norm(),
                    "({n}, {l}, {m}) at {point:?}: {psi} vs {expected}"
                );
            }
        }
    }
}
