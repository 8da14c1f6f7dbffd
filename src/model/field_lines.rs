//! Field-line sampling per rotation phase
//!
//! For each discrete phase step the sampler lays down a batch of sample
//! points, several azimuths per magnetic loop, co-rotating with the star.
//! Each point starts in the rotation frame, is rotated into its loop's
//! dipole frame, and is then pulled onto the dipole field line through the
//! L-shell equation `r = L sin^2(theta)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::coords::Coordinates;

use super::config::{InclinationConvention, ModelConfig};

/// One field-line sample point for a single phase step
///
/// Ephemeral: produced per (phase, sample) pair and folded into the
/// spectrum immediately afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLineSample {
    /// Index of the magnetic loop this sample belongs to
    pub loop_index: usize,
    /// Sample index within the phase step, ascending across loops
    pub sample_index: usize,
    /// Phase step the sample was generated for
    pub phase_step: usize,
    /// Position in the dipole frame after the L-shell correction
    pub position: Coordinates,
    /// L-shell-corrected radial distance, stellar radii
    pub r_corrected: f64,
}

impl FieldLineSample {
    /// Polar angle of the sample in the dipole frame
    pub fn theta(&self) -> f64 {
        match self.position {
            Coordinates::Spherical { theta, .. } => theta,
            // Samples are constructed spherical and stay spherical.
            _ => unreachable!("field-line samples are spherical"),
        }
    }
}

/// Generate the sample batch for phase step `t`
///
/// Azimuths follow the reference indexing: the global sample index `j`
/// (loop `i = j / lines_per_loop`) gets
/// `phi = j * lines_per_loop * 2pi/P + (t mod P) * 2pi/P + lng[i]`,
/// so consecutive samples on a loop trail each other by `lines_per_loop`
/// phase steps of rotation.
///
/// # Arguments
/// * `config` - Run configuration (loops, discretization, geometry)
/// * `t` - Phase step in `[0, span_periods * period_steps)`
///
/// # Returns
/// One `FieldLineSample` per (loop, azimuth) pair, in sample order
pub fn sample_phase(config: &ModelConfig, t: usize) -> Vec<FieldLineSample> {
    let p = config.period_steps as f64;
    let step_angle = TAU / p;
    let rotation = (t % config.period_steps) as f64 * step_angle;

    let mut batch = Vec::with_capacity(config.samples_per_step());
    for (i, magnetic_loop) in config.loops.iter().enumerate() {
        for k in 0..config.lines_per_loop {
            let j = i * config.lines_per_loop + k;
            let phi = (j * config.lines_per_loop) as f64 * step_angle
                + rotation
                + magnetic_loop.longitude_rad;

            let start = Coordinates::Spherical {
                r: magnetic_loop.l_shell,
                theta: config.inclination_rad,
                phi,
            };

            // Into the dipole-aligned frame, then onto the field line.
            let rotated = start.rotate(magnetic_loop.tilt_rad);
            let Coordinates::Spherical { r, theta, phi } = rotated else {
                unreachable!("rotate preserves the coordinate system");
            };
            let r_corrected = r * (FRAC_PI_2 - theta).cos().powi(2);

            let mut position = Coordinates::Spherical {
                r: r_corrected,
                theta,
                phi,
            };
            if config.inclination_convention == InclinationConvention::PostRotation {
                position = position.rotate(config.inclination_rad);
            }

            let r_corrected = match position {
                Coordinates::Spherical { r, .. } => r,
                _ => unreachable!("rotate preserves the coordinate system"),
            };

            batch.push(FieldLineSample {
                loop_index: i,
                sample_index: j,
                phase_step: t,
                position,
                r_corrected,
            });
        }
    }
    batch
}
