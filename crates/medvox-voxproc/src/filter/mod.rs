//! Separable Gaussian filtering over 3D volumes.
//!
//! A volume is smoothed by sweeping a 1D Gaussian kernel along one axis at a
//! time, in place. Each sweep decomposes into independent row convolutions
//! that run in parallel; the separable X-then-Y-then-Z composition is the
//! conventional driver for an isotropic 3D blur.

/// Gaussian kernel construction.
pub mod kernels;

/// Row and volume convolution engines.
mod convolution;
pub use convolution::*;

/// Filter entry points.
mod ops;
pub use ops::*;
