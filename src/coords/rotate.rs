//! Reference-frame rotation by a single Euler angle
//!
//! The modeled geometries only ever need one tilt degree of freedom (rotation
//! axis to dipole axis, or dipole frame to observer frame), so the full Euler
//! machinery reduces to one rotation about the x-axis. The rotation is
//! performed in cartesian coordinates and the result is handed back in the
//! system the input arrived in.

use nalgebra::{Matrix3, Vector3};

use super::{from_cartesian, Coordinates};

impl Coordinates {
    /// Incline the reference frame by `angle` radians about the x-axis
    ///
    /// The convention is row-vector times matrix, `q' = q * R(angle)` with
    ///
    /// ```text
    /// R(angle) = [[1,  0,           0         ],
    ///             [0,  cos(angle),  sin(angle)],
    ///             [0, -sin(angle),  cos(angle)]]
    /// ```
    ///
    /// Rotating by 0 is the identity up to floating-point tolerance, and
    /// `rotate(a)` followed by `rotate(-a)` recovers the input.
    ///
    /// # Arguments
    /// * `angle` - Frame inclination in radians
    ///
    /// # Returns
    /// The position in the rotated frame, expressed in the same system as
    /// the input
    pub fn rotate(&self, angle: f64) -> Coordinates {
        let (x, y, z) = self.cartesian_triple();

        // q * R is equivalent to R^T * q as a column vector.
        let (sin_a, cos_a) = angle.sin_cos();
        let r_t = Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, cos_a, -sin_a, //
            0.0, sin_a, cos_a,
        );
        let q = r_t * Vector3::new(x, y, z);

        from_cartesian(self.system(), q[0], q[1], q[2])
    }
}
