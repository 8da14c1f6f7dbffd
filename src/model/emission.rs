//! Cyclotron emission from a single field-line sample
//!
//! Given the L-shell-corrected position of an emitting electron population
//! and the configured angular-distribution model, this module computes the
//! emitted frequency (relative to the surface cyclotron frequency), the
//! beaming angle, a Gaussian beaming intensity profile, and the circular
//! polarization handedness. Everything here is a pure function of its
//! inputs.

use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::coords::acos_clamped;

/// Width of the Gaussian beaming profile, in units of theta / 2pi
const BEAM_SIGMA: f64 = 0.01;

/// Errors from the emission model
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmissionError {
    #[error("unknown electron distribution model: {0:?}")]
    UnknownDistribution(String),
}

/// Electron angular-distribution model
///
/// The distribution sets how the beaming angle and the frequency ratio are
/// derived from the local field geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Distribution {
    /// Electrons fill a thin shell in velocity space
    Shell,
    /// Electrons gyrate on a loss-cone distribution
    Cone,
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distribution::Shell => write!(f, "shell"),
            Distribution::Cone => write!(f, "cone"),
        }
    }
}

impl FromStr for Distribution {
    type Err = EmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(Distribution::Shell),
            "cone" => Ok(Distribution::Cone),
            other => Err(EmissionError::UnknownDistribution(other.to_string())),
        }
    }
}

/// Result of evaluating the emission model at one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// Emitted frequency over the surface cyclotron frequency, in [0, 1]
    pub frequency_ratio: f64,
    /// Beaming angle of peak emission, radians
    pub beam_angle: f64,
    /// Gaussian beaming profile evaluated at the sample's polar angle
    pub intensity: f64,
    /// Circular polarization handedness: +1 northern magnetic hemisphere,
    /// -1 southern
    pub polarization: f64,
}

/// Evaluate the emission model for one corrected field-line sample
///
/// # Arguments
/// * `distribution` - Electron angular-distribution model
/// * `theta` - Polar angle of the sample in the dipole frame, radians
/// * `r_corrected` - L-shell-corrected radial distance, stellar radii
/// * `beta` - Bulk electron velocity as a fraction of c
///
/// # Returns
/// The frequency ratio, beaming angle, intensity, and polarization sign
pub fn emit(distribution: Distribution, theta: f64, r_corrected: f64, beta: f64) -> Emission {
    let cos_theta = theta.cos();
    // Dipole field magnitude factor sqrt(1 + 3 cos^2 theta) / r^3
    let field_factor = (1.0 + 3.0 * cos_theta * cos_theta).sqrt();
    let f_raw = field_factor / r_corrected.powi(3);
    let lorentz = (1.0 - beta * beta).sqrt();

    let (frequency_ratio, beam_angle) = match distribution {
        Distribution::Shell => {
            let beam = FRAC_PI_2 - acos_clamped(2.0 * cos_theta / field_factor);
            (f64::min(1.0, f_raw * lorentz), beam)
        }
        Distribution::Cone => {
            let ratio = f64::min(1.0, f_raw / lorentz);
            // A saturated ratio zeroes the denominator; the beam collapses
            // onto the field axis instead of propagating 0/0 or inf.
            let denom = (1.0 - ratio).sqrt();
            let beam = if denom == 0.0 {
                0.0
            } else {
                acos_clamped(beta / denom)
            };
            (ratio, beam)
        }
    };

    let mu = (theta - beam_angle).abs() / (2.0 * PI);
    let intensity = (-mu * mu / (2.0 * BEAM_SIGMA * BEAM_SIGMA)).exp()
        / (2.0 * PI * BEAM_SIGMA.powi(4)).sqrt();

    let polarization = if theta < FRAC_PI_2 { 1.0 } else { -1.0 };

    Emission {
        frequency_ratio,
        beam_angle,
        intensity,
        polarization,
    }
}
