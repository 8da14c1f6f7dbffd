//! Coordinate representations and transformations
//!
//! This module provides the three 3-D coordinate representations used by the
//! emission model (spherical, cartesian, cylindrical) and exact pairwise
//! conversions between them. Values are immutable: every transform produces a
//! new `Coordinates`, so positions can be reused safely across the sampling
//! loop.
//!
//! All angles are in radians. The spherical polar angle `theta` is measured
//! from the +z axis; azimuths come out of `atan2` in (-pi, pi].

use thiserror::Error;

pub mod rotate;

/// Errors that can occur when transforming coordinates
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    #[error("invalid transform: source and target systems are identical ({0})")]
    IdenticalSystems(CoordSystem),
}

/// The three supported coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSystem {
    Spherical,
    Cartesian,
    Cylindrical,
}

impl std::fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordSystem::Spherical => write!(f, "spherical"),
            CoordSystem::Cartesian => write!(f, "cartesian"),
            CoordSystem::Cylindrical => write!(f, "cylindrical"),
        }
    }
}

/// A 3-D position tagged with the system its components are expressed in
///
/// Each variant carries its own named components, so a value can never be
/// read under the wrong schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinates {
    /// Radius `r >= 0`, polar angle `theta` in [0, pi] from +z, azimuth `phi`
    Spherical { r: f64, theta: f64, phi: f64 },
    Cartesian { x: f64, y: f64, z: f64 },
    /// Axial distance `s >= 0`, azimuth `phi`, height `z`
    Cylindrical { s: f64, phi: f64, z: f64 },
}

/// `arccos` with the argument clamped to [-1, 1]
///
/// Floating round-off can push a ratio like `z / rho` just outside the
/// domain; clamping keeps the result finite instead of propagating a NaN.
pub(crate) fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

impl Coordinates {
    /// The system this position's components are expressed in
    pub fn system(&self) -> CoordSystem {
        match self {
            Coordinates::Spherical { .. } => CoordSystem::Spherical,
            Coordinates::Cartesian { .. } => CoordSystem::Cartesian,
            Coordinates::Cylindrical { .. } => CoordSystem::Cylindrical,
        }
    }

    /// Express this position in a different coordinate system
    ///
    /// Requesting the system the position is already in is an error, not a
    /// silent identity: callers that ask for a no-op conversion have a logic
    /// bug worth surfacing.
    ///
    /// # Arguments
    /// * `to` - Target coordinate system, must differ from `self.system()`
    ///
    /// # Returns
    /// A new `Coordinates` in the target system
    pub fn transform(&self, to: CoordSystem) -> Result<Coordinates, CoordError> {
        if to == self.system() {
            return Err(CoordError::IdenticalSystems(to));
        }

        Ok(match (*self, to) {
            // The direct paths that skip the cartesian intermediate.
            (Coordinates::Spherical { r, theta, phi }, CoordSystem::Cylindrical) => {
                Coordinates::Cylindrical {
                    s: r * theta.sin(),
                    phi,
                    z: r * theta.cos(),
                }
            }
            (Coordinates::Cylindrical { s, phi, z }, CoordSystem::Spherical) => {
                Coordinates::Spherical {
                    r: (s * s + z * z).sqrt(),
                    // atan2 rather than arctan(s/z) so the equatorial plane
                    // (z = 0) maps to theta = pi/2 instead of faulting.
                    theta: s.atan2(z),
                    phi,
                }
            }
            // Everything else routes through the cartesian components.
            (v, to) => {
                let (x, y, z) = v.cartesian_triple();
                from_cartesian(to, x, y, z)
            }
        })
    }

    /// The cartesian components of this position, converting if necessary
    pub(crate) fn cartesian_triple(&self) -> (f64, f64, f64) {
        match *self {
            Coordinates::Cartesian { x, y, z } => (x, y, z),
            Coordinates::Spherical { r, theta, phi } => (
                r * theta.sin() * phi.cos(),
                r * theta.sin() * phi.sin(),
                r * theta.cos(),
            ),
            Coordinates::Cylindrical { s, phi, z } => (s * phi.cos(), s * phi.sin(), z),
        }
    }
}

/// Build a `Coordinates` in `system` from cartesian components
///
/// The single home of the inverse formulas, shared by `transform` and the
/// frame rotation.
pub(crate) fn from_cartesian(system: CoordSystem, x: f64, y: f64, z: f64) -> Coordinates {
    match system {
        CoordSystem::Cartesian => Coordinates::Cartesian { x, y, z },
        CoordSystem::Spherical => {
            let rho = (x * x + y * y + z * z).sqrt();
            // theta = arccos(z / rho); at the origin the polar angle is
            // indeterminate and 0 is used.
            let theta = if rho == 0.0 { 0.0 } else { acos_clamped(z / rho) };
            Coordinates::Spherical {
                r: rho,
                theta,
                phi: y.atan2(x),
            }
        }
        CoordSystem::Cylindrical => Coordinates::Cylindrical {
            s: (x * x + y * y).sqrt(),
            phi: y.atan2(x),
            z,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_close(a: &Coordinates, b: &Coordinates) {
        let (ax, ay, az) = a.cartesian_triple();
        let (bx, by, bz) = b.cartesian_triple();
        assert_relative_eq!(ax, bx, epsilon = 1e-12);
        assert_relative_eq!(ay, by, epsilon = 1e-12);
        assert_relative_eq!(az, bz, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_transform_is_an_error() {
        let v = Coordinates::Spherical {
            r: 1.0,
            theta: FRAC_PI_4,
            phi: 0.0,
        };
        assert_eq!(
            v.transform(CoordSystem::Spherical),
            Err(CoordError::IdenticalSystems(CoordSystem::Spherical))
        );
    }

    #[test]
    fn test_spherical_to_cartesian_axes() {
        // theta = 0 sits on +z regardless of phi
        let pole = Coordinates::Spherical {
            r: 3.0,
            theta: 0.0,
            phi: 1.2,
        };
        let (x, y, z) = pole.cartesian_triple();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z, 3.0, epsilon = 1e-12);

        // theta = pi/2, phi = 0 sits on +x
        let eq = Coordinates::Spherical {
            r: 2.0,
            theta: FRAC_PI_2,
            phi: 0.0,
        };
        let (x, y, z) = eq.cartesian_triple();
        assert_relative_eq!(x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cartesian_to_spherical_uses_rho_not_rho_squared() {
        // (0, 0, 2): rho = 2, so z / rho = 1 and theta = 0. The broken
        // z / rho^2 form would give arccos(0.5) instead.
        let v = Coordinates::Cartesian {
            x: 0.0,
            y: 0.0,
            z: 2.0,
        };
        match v.transform(CoordSystem::Spherical).unwrap() {
            Coordinates::Spherical { r, theta, .. } => {
                assert_relative_eq!(r, 2.0, epsilon = 1e-12);
                assert_relative_eq!(theta, 0.0, epsilon = 1e-12);
            }
            other => panic!("expected spherical, got {other:?}"),
        }
    }

    #[test]
    fn test_cylindrical_to_spherical_handles_zero_height() {
        let v = Coordinates::Cylindrical {
            s: 1.5,
            phi: 0.3,
            z: 0.0,
        };
        match v.transform(CoordSystem::Spherical).unwrap() {
            Coordinates::Spherical { r, theta, phi } => {
                assert_relative_eq!(r, 1.5, epsilon = 1e-12);
                assert_relative_eq!(theta, FRAC_PI_2, epsilon = 1e-12);
                assert_relative_eq!(phi, 0.3, epsilon = 1e-12);
            }
            other => panic!("expected spherical, got {other:?}"),
        }
    }

    #[test]
    fn test_origin_maps_to_zero_polar_angle() {
        let v = Coordinates::Cartesian {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        match v.transform(CoordSystem::Spherical).unwrap() {
            Coordinates::Spherical { r, theta, .. } => {
                assert_eq!(r, 0.0);
                assert_eq!(theta, 0.0);
            }
            other => panic!("expected spherical, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trips_all_pairs() {
        let samples = [
            Coordinates::Spherical {
                r: 2.0,
                theta: FRAC_PI_4,
                phi: 0.7,
            },
            Coordinates::Spherical {
                r: 5.0,
                theta: 2.0,
                phi: -1.1,
            },
            Coordinates::Cartesian {
                x: 1.0,
                y: -2.0,
                z: 3.0,
            },
            Coordinates::Cylindrical {
                s: 1.2,
                phi: 2.5,
                z: -0.4,
            },
        ];
        let systems = [
            CoordSystem::Spherical,
            CoordSystem::Cartesian,
            CoordSystem::Cylindrical,
        ];

        for v in &samples {
            for &to in systems.iter().filter(|&&s| s != v.system()) {
                let back = v
                    .transform(to)
                    .unwrap()
                    .transform(v.system())
                    .unwrap();
                assert_close(v, &back);
            }
        }
    }

    #[test]
    fn test_direct_path_matches_composition_through_cartesian() {
        for &(r, theta, phi) in &[
            (1.0, FRAC_PI_4, 0.0),
            (2.5, 1.9, 2.2),
            (4.0, FRAC_PI_2, -2.8),
            (0.5, 0.1, PI),
        ] {
            let v = Coordinates::Spherical { r, theta, phi };

            let direct = v.transform(CoordSystem::Cylindrical).unwrap();
            let composed = v
                .transform(CoordSystem::Cartesian)
                .unwrap()
                .transform(CoordSystem::Cylindrical)
                .unwrap();
            assert_close(&direct, &composed);

            let back_direct = direct.transform(CoordSystem::Spherical).unwrap();
            let back_composed = direct
                .transform(CoordSystem::Cartesian)
                .unwrap()
                .transform(CoordSystem::Spherical)
                .unwrap();
            assert_close(&back_direct, &back_composed);
        }
    }

    #[test]
    fn test_acos_clamped_is_domain_safe() {
        assert_eq!(acos_clamped(1.0 + 1e-15), 0.0);
        assert_eq!(acos_clamped(-1.0 - 1e-15), PI);
        assert_relative_eq!(acos_clamped(0.0), FRAC_PI_2, epsilon = 1e-15);
    }
}
