//! Dynamic-spectrum accumulation grid
//!
//! The finished artifact of a run: a dense 2-D intensity map indexed by
//! (frequency bin, phase bin). The frequency axis is the emitted-to-surface
//! cyclotron frequency ratio scaled onto integer bins `0..=1000`; callers
//! map bins to physical units with `frequency = bin / 1000 * f_0`.

use ndarray::Array2;

/// Number of frequency bins above zero; ratios in [0, 1] scale onto
/// `0..=FREQ_BINS`.
pub const FREQ_BINS: usize = 1000;

/// 2-D intensity map over (frequency bin, phase bin)
///
/// Cells hold the most recently written value; the write policy is
/// last-write-wins, so callers are responsible for a deterministic write
/// order (the pipeline writes phase-ascending, then sample-ascending).
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSpectrum {
    grid: Array2<f64>,
}

impl DynamicSpectrum {
    /// Create an empty spectrum with `phase_bins` columns, all cells zero
    pub fn new(phase_bins: usize) -> Self {
        Self {
            grid: Array2::zeros((FREQ_BINS + 1, phase_bins)),
        }
    }

    /// Frequency bin for a frequency ratio in [0, 1]
    ///
    /// Truncating scale by `FREQ_BINS`, matching the reference's float
    /// indexing; out-of-range ratios saturate at the edges.
    pub fn frequency_bin(frequency_ratio: f64) -> usize {
        ((frequency_ratio * FREQ_BINS as f64) as usize).min(FREQ_BINS)
    }

    /// Overwrite the cell at (`frequency_bin`, `phase_bin`)
    ///
    /// Last write wins; earlier values at the same cell are discarded.
    pub fn write(&mut self, phase_bin: usize, frequency_bin: usize, intensity: f64) {
        self.grid[[frequency_bin, phase_bin]] = intensity;
    }

    /// The finished grid, frequency bins as rows and phase bins as columns
    pub fn grid(&self) -> &Array2<f64> {
        &self.grid
    }

    /// Number of phase bins
    pub fn phase_bins(&self) -> usize {
        self.grid.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_shape_and_default() {
        let spectrum = DynamicSpectrum::new(16);
        assert_eq!(spectrum.grid().dim(), (1001, 16));
        assert_eq!(spectrum.phase_bins(), 16);
        assert!(spectrum.grid().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_last_write_wins() {
        let mut spectrum = DynamicSpectrum::new(4);
        spectrum.write(0, 5, 0.3);
        spectrum.write(0, 5, 0.7);
        assert_eq!(spectrum.grid()[[5, 0]], 0.7);
    }

    #[test]
    fn test_frequency_binning_truncates() {
        assert_eq!(DynamicSpectrum::frequency_bin(0.0), 0);
        assert_eq!(DynamicSpectrum::frequency_bin(0.125), 125);
        assert_eq!(DynamicSpectrum::frequency_bin(0.9999), 999);
        assert_eq!(DynamicSpectrum::frequency_bin(1.0), 1000);
        // Saturates rather than indexing out of bounds.
        assert_eq!(DynamicSpectrum::frequency_bin(1.2), 1000);
    }

    #[test]
    fn test_distinct_cells_are_independent() {
        let mut spectrum = DynamicSpectrum::new(4);
        spectrum.write(1, 10, -0.5);
        spectrum.write(2, 10, 0.25);
        spectrum.write(1, 11, 1.5);
        assert_eq!(spectrum.grid()[[10, 1]], -0.5);
        assert_eq!(spectrum.grid()[[10, 2]], 0.25);
        assert_eq!(spectrum.grid()[[11, 1]], 1.5);
    }
}
