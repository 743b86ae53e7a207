use anyhow::Context;
use clap::Parser;
use hydrogen_cloud::logging::{init_logging, DEFAULT_FILTER};
use hydrogen_cloud::sampling::{
    DEFAULT_DENSITY_THRESHOLD, DEFAULT_RADIUS_BOHR, DEFAULT_SAMPLE_TRIALS,
};
use hydrogen_cloud::{
    AcceptanceRule, CloudJob, CloudSampler, QuantumState, SamplerConfig, BOHR_RADIUS,
};
use tracing::info;

/// Sample the electron cloud of a hydrogen-like orbital and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "hydrogen-cloud", version)]
struct Cli {
    /// Principal quantum number (1 to 64)
    n: i64,
    /// Orbital quantum number
    l: i64,
    /// Magnetic quantum number
    #[arg(allow_negative_numbers = true)]
    m: i64,
    /// Nuclear charge (1 to 118)
    #[arg(default_value_t = 1)]
    z: i64,

    /// Number of sampling trials
    #[arg(long, default_value_t = DEFAULT_SAMPLE_TRIALS)]
    samples: usize,

    /// Sampling radius in Bohr radii
    #[arg(long, default_value_t = DEFAULT_RADIUS_BOHR)]
    radius: f64,

    /// Minimum |ψ|² (m⁻³) for a point to be kept
    #[arg(long, default_value_t = DEFAULT_DENSITY_THRESHOLD)]
    threshold: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Accept in proportion to |ψ|² / max|ψ|² instead of the fixed threshold
    #[arg(long)]
    normalized: bool,

    /// Print (x, y, z) instead of (r, θ, φ)
    #[arg(long)]
    cartesian: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(DEFAULT_FILTER).context("failed to initialize logging")?;

    let state = QuantumState::new(cli.n, cli.l, cli.m, cli.z)?;
    let acceptance = if cli.normalized {
        AcceptanceRule::Normalized
    } else {
        AcceptanceRule::Threshold
    };
    let job = CloudJob {
        state,
        config: SamplerConfig::default()
            .with_sample_trials(cli.samples)
            .with_radius_bound(cli.radius * BOHR_RADIUS)
            .with_density_threshold(cli.threshold)
            .with_acceptance(acceptance),
        seed: cli.seed,
        cartesian: cli.cartesian,
    };

    info!(
        "Generating orbital {} (n={}, l={}, m={}, Z={}) with {} trials",
        state.label(),
        cli.n,
        cli.l,
        cli.m,
        cli.z,
        cli.samples
    );
    let points = job.run(&CloudSampler::new())?;

    let json = serde_json::to_string(&points).context("failed to serialize cloud")?;
    println!("{json}");
    Ok(())
}
