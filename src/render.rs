//! Grayscale rendering of a finished dynamic spectrum
//!
//! Converts the signed intensity grid into an 8-bit grayscale image for
//! quick inspection. Values are stretched linearly from the grid's minimum
//! to its maximum, so right- and left-handed polarization land on opposite
//! sides of mid-gray. Row 0 of the grid (lowest frequency) is drawn at the
//! bottom of the image.

use image::{GrayImage, Luma};
use ndarray::Array2;

/// Render a spectrum grid as a grayscale image with a linear stretch
///
/// # Arguments
/// * `grid` - Intensity grid, frequency bins as rows, phase bins as columns
///
/// # Returns
/// GrayImage with one pixel per cell, frequency increasing upwards
pub fn spectrum_to_gray_image(grid: &Array2<f64>) -> GrayImage {
    let (rows, cols) = grid.dim();
    let mut img = GrayImage::new(cols as u32, rows as u32);

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in grid.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return img;
    }

    for row in 0..rows {
        for col in 0..cols {
            let scaled = ((grid[[row, col]] - min) / range * 255.0) as u8;
            // Flip vertically so low frequencies sit at the image bottom.
            img.put_pixel(col as u32, (rows - 1 - row) as u32, Luma([scaled]));
        }
    }

    img
}
