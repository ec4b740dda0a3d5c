//! # Bilinear Sampler
//!
//! Continuous height queries over a discrete row-major grid.
//!
//! Rendering and physics collaborators work in continuous space; the grid
//! is discrete. [`bilinear`] bridges the two by interpolating between the
//! four grid points surrounding a continuous `(x, y)` position.
//!
//! ## Boundary policy
//!
//! Coordinates are clamped into `[0, width - 1]` on both axes and the
//! "high" corner index is clamped to `width - 1`, so sampling at or past
//! the grid edge degenerates to the edge value instead of reading out of
//! range. This keeps interpolation exact at every grid point, including
//! the far corner.

/// Linear interpolation between two values.
///
/// `alpha = 0` yields `low`, `alpha = 1` yields `high`.
#[inline]
#[must_use]
pub fn lerp(low: f64, high: f64, alpha: f64) -> f64 {
    (high - low) * alpha + low
}

/// Samples a row-major `width * width` grid at a continuous position.
///
/// The four surrounding grid values are blended with the standard
/// partition-of-unity bilinear weights, so the weights always sum to one
/// and sampling exactly on a grid point returns that point's value.
///
/// # Preconditions
///
/// `width` is positive, `values.len() == width * width`, and `x`/`y` are
/// finite. None of these are validated in release builds.
///
/// ```
/// use ridgeline_terrain::bilinear;
///
/// let grid = [0.0, 10.0, 20.0, 30.0];
/// assert_eq!(bilinear(2, 0.5, 0.5, &grid), 15.0);
/// ```
#[must_use]
pub fn bilinear(width: usize, x: f64, y: f64, values: &[f64]) -> f64 {
    debug_assert!(width > 0, "grid width must be positive");
    debug_assert_eq!(values.len(), width * width, "grid length mismatch");

    // Sanitize coordinates.
    let cap = (width - 1) as f64;
    let x = x.clamp(0.0, cap);
    let y = y.clamp(0.0, cap);

    // Find corners of the surrounding square.
    let x_lo = x.floor() as usize;
    let y_lo = y.floor() as usize;
    let x_hi = (x_lo + 1).min(width - 1);
    let y_hi = (y_lo + 1).min(width - 1);

    // Get values of corners.
    let val_a = values[y_lo * width + x_lo];
    let val_b = values[y_hi * width + x_lo];
    let val_c = values[y_lo * width + x_hi];
    let val_d = values[y_hi * width + x_hi];

    // Blend using the fractional offsets inside the square.
    let fx = x - x_lo as f64;
    let fy = y - y_lo as f64;

    let weight_a = (1.0 - fx) * (1.0 - fy);
    let weight_b = (1.0 - fx) * fy;
    let weight_c = fx * (1.0 - fy);
    let weight_d = fx * fy;

    weight_a * val_a + weight_b * val_b + weight_c * val_c + weight_d * val_d
}
