//! Model configuration and the two historical input formats
//!
//! A run is fully described by a `ModelConfig`: the magnetic-loop table, the
//! rotation/phase discretization, the viewing geometry, and the electron
//! distribution. Configurations are built in code (see [`models`]) or parsed
//! from one of two text formats that have coexisted historically:
//!
//! - whitespace-delimited, with `#`-prefixed comment lines:
//!   ```text
//!   # loops  distribution
//!   1 shell
//!   100 0.5 0.1 90.0
//!   2.0 0.0 0.0
//!   ```
//! - comma-delimited, with inline `#` comments stripped before tokenizing.
//!
//! Line 1 holds the loop count and distribution, line 2 holds
//! `P  B0  beta  inc_deg`, and each of the following `n` lines holds one
//! loop as `L  d_deg  lng_deg`. Angles are converted from degrees to radians
//! here, at the boundary; the core only ever sees radians.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::emission::{Distribution, EmissionError};

/// Errors raised while reading a model configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing field {field:?}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: cannot parse {field:?} from {value:?}")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("expected {expected} loop lines, found {found}")]
    TooFewLoops { expected: usize, found: usize },

    #[error(transparent)]
    Distribution(#[from] EmissionError),
}

/// One magnetic loop: a dipole field line populated with electrons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticLoop {
    /// Equatorial distance of the field line, in stellar radii
    pub l_shell: f64,
    /// Tilt of this loop's dipole axis against the rotation axis, radians
    pub tilt_rad: f64,
    /// Longitude offset of the loop's foot point, radians
    pub longitude_rad: f64,
}

/// How the viewing inclination enters the sampling geometry
///
/// The two source drafts disagreed on this, so both are kept as explicit
/// options rather than mixed implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InclinationConvention {
    /// The inclination is folded into the initial sample placement as the
    /// starting polar angle (reference behavior).
    #[default]
    Placement,
    /// Additionally rotate each corrected sample by the inclination after
    /// the L-shell correction.
    PostRotation,
}

/// Full description of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Magnetic loops to sample, one entry per field line family
    pub loops: Vec<MagneticLoop>,
    /// Electron angular-distribution model
    pub distribution: Distribution,
    /// Number of discrete phase steps per stellar rotation
    pub period_steps: usize,
    /// Surface magnetic field strength, tesla
    pub b_0: f64,
    /// Bulk electron velocity as a fraction of c
    pub beta: f64,
    /// Viewing inclination, radians
    pub inclination_rad: f64,
    /// Number of full rotations to simulate
    pub span_periods: usize,
    /// Field-line sample azimuths generated per loop per phase step
    pub lines_per_loop: usize,
    /// Where the viewing inclination enters the geometry
    pub inclination_convention: InclinationConvention,
}

/// Sample azimuths per loop in the reference pipeline
pub const DEFAULT_LINES_PER_LOOP: usize = 5;

/// Rotations simulated by the reference pipeline
pub const DEFAULT_SPAN_PERIODS: usize = 2;

impl ModelConfig {
    /// Total number of phase steps in a run
    pub fn phase_steps(&self) -> usize {
        self.span_periods * self.period_steps
    }

    /// Total number of field-line samples per phase step
    pub fn samples_per_step(&self) -> usize {
        self.loops.len() * self.lines_per_loop
    }

    /// Read a configuration from a file in either historical format
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// Parse a configuration from text in either historical format
    ///
    /// Comment-only and blank lines are skipped; inline `#` comments are
    /// stripped. A line is split on commas when it contains one, otherwise
    /// on whitespace, so the two formats can be read by the same pass.
    pub fn parse_str(text: &str) -> Result<Self, ConfigError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, raw)| {
                let content = raw.split('#').next().unwrap_or("");
                (idx + 1, content.trim())
            })
            .filter(|(_, content)| !content.is_empty());

        let (line_no, header) = lines
            .next()
            .ok_or(ConfigError::MissingField {
                line: 1,
                field: "loop count",
            })?;
        let header = tokenize(header);
        let n: usize = parse_field(&header, 0, line_no, "loop count")?;
        let distribution_str: String = parse_field(&header, 1, line_no, "distribution")?;
        let distribution = Distribution::from_str(&distribution_str)?;

        let (line_no, params) = lines.next().ok_or(ConfigError::MissingField {
            line: line_no + 1,
            field: "period steps",
        })?;
        let params = tokenize(params);
        let period_steps: usize = parse_field(&params, 0, line_no, "period steps")?;
        let b_0: f64 = parse_field(&params, 1, line_no, "field strength")?;
        let beta: f64 = parse_field(&params, 2, line_no, "beta")?;
        let inc_deg: f64 = parse_field(&params, 3, line_no, "inclination")?;

        let mut loops = Vec::with_capacity(n);
        for (line_no, loop_line) in lines.by_ref().take(n) {
            let fields = tokenize(loop_line);
            let l_shell: f64 = parse_field(&fields, 0, line_no, "L-shell")?;
            let tilt_deg: f64 = parse_field(&fields, 1, line_no, "dipole tilt")?;
            let lng_deg: f64 = parse_field(&fields, 2, line_no, "longitude offset")?;
            loops.push(MagneticLoop {
                l_shell,
                tilt_rad: tilt_deg.to_radians(),
                longitude_rad: lng_deg.to_radians(),
            });
        }
        if loops.len() != n {
            return Err(ConfigError::TooFewLoops {
                expected: n,
                found: loops.len(),
            });
        }

        Ok(ModelConfig {
            loops,
            distribution,
            period_steps,
            b_0,
            beta,
            inclination_rad: inc_deg.to_radians(),
            span_periods: DEFAULT_SPAN_PERIODS,
            lines_per_loop: DEFAULT_LINES_PER_LOOP,
            inclination_convention: InclinationConvention::default(),
        })
    }
}

/// Split a comment-stripped line into fields
fn tokenize(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Parse one positional field with line/field context on failure
fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    line: usize,
    field: &'static str,
) -> Result<T, ConfigError> {
    let raw = fields
        .get(index)
        .ok_or(ConfigError::MissingField { line, field })?;
    raw.parse().map_err(|_| ConfigError::Parse {
        line,
        field,
        value: (*raw).to_string(),
    })
}

/// Predefined model configurations
///
/// These mirror the kinds of geometries the input decks described: an
/// aligned dipole seen edge-on, an oblique rotator, and a two-loop system.
pub mod models {
    use once_cell::sync::Lazy;
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    /// Single aligned loop at L = 2, viewed edge-on
    pub static ALIGNED_DIPOLE: Lazy<ModelConfig> = Lazy::new(|| ModelConfig {
        loops: vec![MagneticLoop {
            l_shell: 2.0,
            tilt_rad: 0.0,
            longitude_rad: 0.0,
        }],
        distribution: Distribution::Shell,
        period_steps: 100,
        b_0: 0.5,
        beta: 0.1,
        inclination_rad: FRAC_PI_2,
        span_periods: DEFAULT_SPAN_PERIODS,
        lines_per_loop: DEFAULT_LINES_PER_LOOP,
        inclination_convention: InclinationConvention::Placement,
    });

    /// Single tilted loop on a cone distribution
    pub static OBLIQUE_ROTATOR: Lazy<ModelConfig> = Lazy::new(|| ModelConfig {
        loops: vec![MagneticLoop {
            l_shell: 2.5,
            tilt_rad: 15f64.to_radians(),
            longitude_rad: 0.0,
        }],
        distribution: Distribution::Cone,
        period_steps: 100,
        b_0: 0.5,
        beta: 0.2,
        inclination_rad: 60f64.to_radians(),
        span_periods: DEFAULT_SPAN_PERIODS,
        lines_per_loop: DEFAULT_LINES_PER_LOOP,
        inclination_convention: InclinationConvention::Placement,
    });

    /// Two loops with opposite tilts and offset foot points
    pub static TWO_LOOP: Lazy<ModelConfig> = Lazy::new(|| ModelConfig {
        loops: vec![
            MagneticLoop {
                l_shell: 2.0,
                tilt_rad: 10f64.to_radians(),
                longitude_rad: 0.0,
            },
            MagneticLoop {
                l_shell: 3.0,
                tilt_rad: (-10f64).to_radians(),
                longitude_rad: FRAC_PI_2,
            },
        ],
        distribution: Distribution::Shell,
        period_steps: 100,
        b_0: 0.5,
        beta: 0.1,
        inclination_rad: 75f64.to_radians(),
        span_periods: DEFAULT_SPAN_PERIODS,
        lines_per_loop: DEFAULT_LINES_PER_LOOP,
        inclination_convention: InclinationConvention::Placement,
    });
}
