/// Default truncation tolerance for Gaussian kernels.
pub const DEFAULT_TOLERANCE: f32 = 0.001;

/// Sigmas at or below this build the identity kernel instead of dividing by
/// a vanishing sigma.
const MIN_SIGMA: f32 = 1e-6;

// Fixed single-precision constant so kernels are bit-for-bit reproducible
// across implementations.
const PACKAGE_PI: f32 = 3.141592;

/// A 1D Gaussian kernel of odd length `2 * radius + 1`.
///
/// The taps are the unnormalized Gaussian density sampled at integer offsets:
/// `c[radius + x] = (1 / (sigma * sqrt(2 * pi))) * exp(-0.5 * (x / sigma)^2)`.
/// The coefficient sum is recorded but never applied; truncation biases the
/// response by at most twice the tolerance, and downstream consumers depend
/// on the historical unnormalized output.
#[derive(Clone, Debug)]
pub struct GaussianKernel1d {
    radius: usize,
    taps: Vec<f32>,
    sum: f32,
}

impl GaussianKernel1d {
    /// Build a kernel for `sigma`, truncated where the density falls below
    /// the fraction `tol` of its peak: `radius = floor(sigma * sqrt(2 *
    /// ln(1 / tol)))`.
    ///
    /// `sigma` and `tol` are forced non-negative by taking absolute values.
    /// A sigma of zero (or within 1e-6 of it) yields the identity kernel of
    /// radius 0 with the single tap `[1.0]`, so a zero-sigma pass is a
    /// bit-identical no-op.
    pub fn new(sigma: f32, tol: f32) -> Self {
        let sigma = sigma.abs();
        let tol = tol.abs();

        if sigma <= MIN_SIGMA {
            return Self {
                radius: 0,
                taps: vec![1.0],
                sum: 1.0,
            };
        }

        let radius = (sigma * (2.0 * (1.0 / tol).ln()).sqrt()).floor() as usize;
        let mut taps = Vec::with_capacity(2 * radius + 1);
        let norm = 1.0 / (sigma * (2.0 * PACKAGE_PI).sqrt());

        let mut sum = 0.0;
        for x in -(radius as i32)..=(radius as i32) {
            let t = x as f32 / sigma;
            let tap = norm * (-0.5 * t * t).exp();
            taps.push(tap);
            sum += tap;
        }

        Self { radius, taps, sum }
    }

    /// Build a kernel with the default truncation tolerance of 0.001.
    pub fn with_default_tol(sigma: f32) -> Self {
        Self::new(sigma, DEFAULT_TOLERANCE)
    }

    /// The kernel radius; the tap array has length `2 * radius + 1`.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The kernel taps, center at index `radius`.
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always false; a kernel has at least its center tap.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Sum of the taps. Recorded for diagnostics; never applied.
    pub fn sum(&self) -> f32 {
        self.sum
    }

    #[cfg(test)]
    pub(crate) fn from_taps(taps: Vec<f32>) -> Self {
        let radius = taps.len() / 2;
        let sum = taps.iter().sum();
        Self { radius, taps, sum }
    }
}
