use medvox_volume::{Direction, VolumeSize, VolumeViewMut, Voxel};

use super::convolution::convolve_1d;
use super::kernels::GaussianKernel1d;
use crate::error::VoxprocError;

/// Smooth a volume in place with a separable Gaussian.
///
/// For each `(direction, sigma)` pair, in order, a 1D Gaussian kernel with
/// the default truncation tolerance is swept along the given axis. Passing
/// `[X, Y, Z]` with equal sigmas yields the conventional isotropic 3D blur.
/// The buffer is interpreted as a packed, X-fastest volume of `size`.
///
/// # Arguments
///
/// * `data` - The caller-owned voxel buffer, mutated in place.
/// * `size` - The volume size in voxels.
/// * `directions` - The sweep axis of each pass.
/// * `sigmas` - The Gaussian sigma of each pass; must pair with `directions`.
///
/// # Errors
///
/// Returns [`VoxprocError::LengthMismatch`] when `directions` and `sigmas`
/// differ in length, the buffer validation errors of
/// [`VolumeViewMut::from_slice_mut`], and
/// [`VoxprocError::KernelTooLarge`] when a kernel does not fit its axis.
///
/// # Examples
///
/// ```
/// use medvox_volume::{Direction, VolumeSize};
/// use medvox_voxproc::filter::gaussian_smooth;
///
/// let size = VolumeSize {
///     width: 8,
///     height: 8,
///     depth: 8,
/// };
/// let mut data = vec![0.0f32; size.num_voxels()];
/// data[(4 * 8 + 4) * 8 + 4] = 1.0;
///
/// gaussian_smooth(
///     &mut data,
///     size,
///     &[Direction::X, Direction::Y, Direction::Z],
///     &[1.0, 1.0, 1.0],
/// )
/// .unwrap();
///
/// // the impulse has spread but the response stays centered
/// assert!(data[(4 * 8 + 4) * 8 + 4] > data[(4 * 8 + 4) * 8 + 5]);
/// ```
pub fn gaussian_smooth<T: Voxel>(
    data: &mut [T],
    size: VolumeSize,
    directions: &[Direction],
    sigmas: &[f32],
) -> Result<(), VoxprocError> {
    if directions.len() != sigmas.len() {
        return Err(VoxprocError::LengthMismatch(
            directions.len(),
            sigmas.len(),
        ));
    }

    let mut volume = VolumeViewMut::from_slice_mut(data, size)?;
    log::debug!("gaussian_smooth: {} passes over {size}", directions.len());

    for (&direction, &sigma) in directions.iter().zip(sigmas.iter()) {
        let kernel = GaussianKernel1d::with_default_tol(sigma);
        convolve_1d(&mut volume, direction, &kernel)?;
    }

    Ok(())
}
