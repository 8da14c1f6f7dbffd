//! The sampling -> emission -> aggregation drive loop
//!
//! One phase step at a time, the pipeline asks the sampler for its batch,
//! evaluates the emission model on every sample, and folds the results into
//! the dynamic spectrum. The reference behavior is sequential and fully
//! deterministic: writes land phase-ascending, then sample-ascending, so the
//! last-write-wins policy of the grid is reproducible. The optional parallel
//! path computes phase batches concurrently and folds them in the same
//! order, producing bit-identical output.

use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

use super::config::{ConfigError, ModelConfig};
use super::emission::emit;
use super::field_lines::sample_phase;
use super::spectrum::DynamicSpectrum;

/// Errors aborting a pipeline run
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("configuration has no magnetic loops")]
    NoLoops,

    #[error("period must have at least one phase step")]
    ZeroPeriodSteps,

    #[error("bulk velocity fraction must be in [0, 1), got {0}")]
    InvalidBeta(f64),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Execution options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute phase-step batches on the rayon thread pool. The fold into
    /// the grid stays in phase order either way, so output is identical to
    /// the sequential path.
    pub parallel: bool,
}

/// One grid write produced by a sample, kept in sample order
type CellWrite = (usize, f64);

/// Run the pipeline with default options
pub fn run(config: &ModelConfig) -> Result<DynamicSpectrum, ModelError> {
    run_with_options(config, RunOptions::default())
}

/// Run the full sampling/emission/aggregation pipeline
///
/// # Arguments
/// * `config` - Validated run configuration
/// * `options` - Execution options (parallelism)
///
/// # Returns
/// The finished dynamic spectrum, one column per phase step
pub fn run_with_options(
    config: &ModelConfig,
    options: RunOptions,
) -> Result<DynamicSpectrum, ModelError> {
    if config.loops.is_empty() {
        return Err(ModelError::NoLoops);
    }
    if config.period_steps == 0 || config.lines_per_loop == 0 || config.span_periods == 0 {
        return Err(ModelError::ZeroPeriodSteps);
    }
    if !(0.0..1.0).contains(&config.beta) {
        return Err(ModelError::InvalidBeta(config.beta));
    }

    let phase_steps = config.phase_steps();
    info!(
        "running {} distribution over {} loops, {} phase steps, {} samples per step",
        config.distribution,
        config.loops.len(),
        phase_steps,
        config.samples_per_step()
    );

    let mut spectrum = DynamicSpectrum::new(phase_steps);

    if options.parallel {
        // Batches are independent; compute them concurrently, then fold in
        // phase order so the overwrite policy sees the sequential order.
        let batches: Vec<Vec<CellWrite>> = (0..phase_steps)
            .into_par_iter()
            .map(|t| phase_writes(config, t))
            .collect();
        for (t, writes) in batches.into_iter().enumerate() {
            fold_writes(&mut spectrum, t, writes);
        }
    } else {
        for t in 0..phase_steps {
            let writes = phase_writes(config, t);
            fold_writes(&mut spectrum, t, writes);
        }
    }

    Ok(spectrum)
}

/// Compute the grid writes for one phase step, in sample order
fn phase_writes(config: &ModelConfig, t: usize) -> Vec<CellWrite> {
    sample_phase(config, t)
        .iter()
        .map(|sample| {
            let emission = emit(
                config.distribution,
                sample.theta(),
                sample.r_corrected,
                config.beta,
            );
            debug!(
                "t={} j={} theta={:.4} r={:.4} f={:.4}",
                t,
                sample.sample_index,
                sample.theta(),
                sample.r_corrected,
                emission.frequency_ratio
            );
            // The grid keeps the polarization-signed intensity so the
            // handedness of the emission survives into the rendered map.
            (
                DynamicSpectrum::frequency_bin(emission.frequency_ratio),
                emission.polarization * emission.intensity,
            )
        })
        .collect()
}

/// Apply one phase step's writes in sample order
fn fold_writes(spectrum: &mut DynamicSpectrum, t: usize, writes: Vec<CellWrite>) {
    for (frequency_bin, value) in writes {
        spectrum.write(t, frequency_bin, value);
    }
}
