//! Dynamic-spectrum simulation of cyclotron radio emission from a rotating
//! magnetized star
//!
//! This crate models the phase-frequency emission pattern produced by
//! electrons gyrating along magnetic-dipole field lines of a rotating star,
//! as seen from a fixed line of sight. Field lines are sampled per rotation
//! phase, rotated between the rotation and dipole frames, constrained to
//! the dipole L-shell equation, fed through a shell or cone electron
//! angular-distribution emission model, and binned into a 2-D intensity
//! grid over (frequency, phase).

pub mod coords;
pub mod model;
pub mod physics;
pub mod render;

// Re-exports for easier access
pub use coords::{CoordError, CoordSystem, Coordinates};
pub use model::{
    run, run_with_options, Distribution, DynamicSpectrum, ModelConfig, ModelError, RunOptions,
};
pub use physics::cyclotron_frequency;
pub use render::spectrum_to_gray_image;
