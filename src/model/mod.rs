//! The field-line sampling, emission, and spectrum-binning pipeline

pub mod config;
pub mod emission;
pub mod field_lines;
pub mod pipeline;
pub mod spectrum;

pub use config::{ConfigError, InclinationConvention, MagneticLoop, ModelConfig};
pub use emission::{emit, Distribution, Emission, EmissionError};
pub use field_lines::{sample_phase, FieldLineSample};
pub use pipeline::{run, run_with_options, ModelError, RunOptions};
pub use spectrum::{DynamicSpectrum, FREQ_BINS};
