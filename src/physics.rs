//! Physical constants and the cyclotron frequency scale
//!
//! The core pipeline works in frequency ratios; converting the 0..=1000 bin
//! axis to physical units is the caller's job via the local electron
//! cyclotron frequency computed here. Constants are MKS.

use std::f64::consts::TAU;

/// Physical constants in MKS units
pub struct Mks {}

impl Mks {
    /// Electron rest mass, kg
    pub const ELECTRON_MASS: f64 = 9.11e-31;

    /// Elementary charge, C
    pub const ELEMENTARY_CHARGE: f64 = 1.6e-19;
}

/// Local electron cyclotron frequency at the stellar surface, Hz
///
/// `f_0 = e B_0 / (2 pi m) * sqrt(1 - beta^2)`; the Lorentz factor accounts
/// for the bulk electron velocity. The physical frequency of bin `b` is
/// `b / 1000 * f_0`.
///
/// # Arguments
/// * `b_0` - Surface magnetic field strength, tesla
/// * `beta` - Bulk electron velocity as a fraction of c
pub fn cyclotron_frequency(b_0: f64, beta: f64) -> f64 {
    Mks::ELEMENTARY_CHARGE * b_0 / (TAU * Mks::ELECTRON_MASS) * (1.0 - beta * beta).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_cyclotron_frequency_scale() {
        // e B / (2 pi m) is about 28 GHz per tesla.
        let f_0 = cyclotron_frequency(1.0, 0.0);
        assert!(approx_eq!(f64, f_0 / 1e9, 27.95, epsilon = 0.1));
    }

    #[test]
    fn test_beta_reduces_frequency() {
        let rest = cyclotron_frequency(0.5, 0.0);
        let moving = cyclotron_frequency(0.5, 0.3);
        assert!(moving < rest);
        assert!(approx_eq!(
            f64,
            moving / rest,
            (1.0f64 - 0.09).sqrt(),
            epsilon = 1e-12
        ));
    }
}
