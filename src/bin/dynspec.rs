//! Dynamic-spectrum simulation runner
//!
//! Reads a model configuration deck, runs the sampling/emission pipeline,
//! and writes the resulting spectrum as a grayscale PNG.
//!
//! Usage:
//! ```
//! cargo run --bin dynspec -- --config dynsim.in --output spectrum.png
//! ```
//!
//! See --help for detailed options.

use clap::Parser;
use log::info;

use dynspec::model::{
    run_with_options, Distribution, InclinationConvention, ModelConfig, RunOptions,
};
use dynspec::physics::cyclotron_frequency;
use dynspec::render::spectrum_to_gray_image;

/// Command line arguments for the spectrum simulation
#[derive(Parser, Debug)]
#[command(
    name = "dynspec",
    about = "Simulates the radio dynamic spectrum of a rotating magnetized star",
    long_about = None
)]
struct Args {
    /// Path to the model configuration deck
    #[arg(long, default_value = "dynsim.in")]
    config: String,

    /// Output PNG path for the rendered spectrum
    #[arg(long, default_value = "spectrum.png")]
    output: String,

    /// Override the electron distribution from the deck
    #[arg(long, value_enum)]
    distribution: Option<Distribution>,

    /// Number of full rotations to simulate
    #[arg(long)]
    span: Option<usize>,

    /// Field-line sample azimuths per magnetic loop
    #[arg(long)]
    lines_per_loop: Option<usize>,

    /// Apply the viewing inclination as a second rotation after the
    /// L-shell correction instead of folding it into sample placement
    #[arg(long, default_value_t = false)]
    inclination_rotation: bool,

    /// Compute phase steps on the rayon thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();

    let mut config = ModelConfig::from_path(&args.config)?;
    if let Some(distribution) = args.distribution {
        config.distribution = distribution;
    }
    if let Some(span) = args.span {
        config.span_periods = span;
    }
    if let Some(lines) = args.lines_per_loop {
        config.lines_per_loop = lines;
    }
    if args.inclination_rotation {
        config.inclination_convention = InclinationConvention::PostRotation;
    }

    let spectrum = run_with_options(
        &config,
        RunOptions {
            parallel: args.parallel,
        },
    )?;

    // Physical scale of the frequency axis: bin / 1000 * f_0.
    let f_0 = cyclotron_frequency(config.b_0, config.beta);
    let peak_bin = spectrum
        .grid()
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&v| v != 0.0))
        .map(|(bin, _)| bin)
        .max()
        .unwrap_or(0);
    info!(
        "peak emission frequency: {:.3} GHz (f_0 = {:.3} GHz)",
        peak_bin as f64 / 1000.0 * f_0 / 1e9,
        f_0 / 1e9
    );

    let img = spectrum_to_gray_image(spectrum.grid());
    img.save(&args.output)?;
    info!("wrote {}", args.output);

    Ok(())
}
