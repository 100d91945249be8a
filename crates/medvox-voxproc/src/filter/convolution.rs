use medvox_volume::{Direction, PlaneMut, VolumeViewMut, Voxel};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::kernels::GaussianKernel1d;
use crate::error::VoxprocError;

/// Convolve `input` with `kernel`, writing `output.len()` samples.
///
/// `input` must hold `output.len() + kernel.len() - 1` samples; output
/// element `u` is the dot product of the kernel with the window starting at
/// `u`. The kernel is applied as stored, i.e. as a cross-correlation; for
/// the symmetric Gaussian the distinction is invisible.
///
/// This is the scalar reference path and the correctness oracle for
/// [`convolve_blocked`].
pub fn convolve_reference(input: &[f32], kernel: &[f32], output: &mut [f32]) {
    debug_assert_eq!(input.len(), output.len() + kernel.len() - 1);

    for (out, window) in output.iter_mut().zip(input.windows(kernel.len())) {
        let mut sum = 0.0;
        for (&tap, &sample) in kernel.iter().zip(window) {
            sum += tap * sample;
        }
        *out = sum;
    }
}

/// Convolve `input` with `kernel`, four output samples per outer step.
///
/// The blocked layout mirrors a four-lane SIMD convolver so the compiler can
/// vectorize the inner loop, but every output sample is accumulated in the
/// same tap order as [`convolve_reference`], so the results are bit-identical
/// to the reference on every input, including the final samples.
pub fn convolve_blocked(input: &[f32], kernel: &[f32], output: &mut [f32]) {
    debug_assert_eq!(input.len(), output.len() + kernel.len() - 1);

    let mut blocks = output.chunks_exact_mut(4);
    let mut u = 0;
    for block in &mut blocks {
        let mut acc = [0.0f32; 4];
        for (k, &tap) in kernel.iter().enumerate() {
            let base = u + k;
            acc[0] += tap * input[base];
            acc[1] += tap * input[base + 1];
            acc[2] += tap * input[base + 2];
            acc[3] += tap * input[base + 3];
        }
        block.copy_from_slice(&acc);
        u += 4;
    }

    for (i, out) in blocks.into_remainder().iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &tap) in kernel.iter().enumerate() {
            sum += tap * input[u + i + k];
        }
        *out = sum;
    }
}

/// Convolve every row of a plane with `kernel`, in place.
///
/// Each row is gathered through the voxel codec into a float scratch row at
/// indices `[radius, radius + width)`, mirror-padded at both ends without
/// duplicating the boundary sample, convolved, and scattered back through
/// the saturating writer. Rows run data-parallel on the rayon pool; each
/// worker owns one gather/scatter scratch pair reused across its rows.
///
/// Precondition, checked by [`convolve_1d`]: `kernel.len() < plane.width()`.
pub(crate) fn convolve_rows<T: Voxel>(plane: &PlaneMut<'_, T>, kernel: &GaussianKernel1d) {
    let width = plane.width();
    let radius = kernel.radius();
    let taps = kernel.taps();
    debug_assert!(taps.len() < width);

    (0..plane.height()).into_par_iter().for_each_init(
        || (vec![0.0f32; width + 2 * radius], vec![0.0f32; width]),
        |(gather, scatter), v| {
            // SAFETY: each parallel task holds the cursor for a distinct row
            // index, so no two live cursors alias.
            let mut row = unsafe { plane.row(v) };

            for u in 0..width {
                gather[radius + u] = row.get(u).to_f32();
            }
            // mirror the edges, boundary sample not duplicated
            for i in 0..radius {
                gather[radius - 1 - i] = gather[radius + i];
                gather[radius + width + i] = gather[radius + width - 1 - i];
            }

            convolve_blocked(gather, taps, scatter);

            for u in 0..width {
                row.set(u, T::from_f32(scatter[u]));
            }
        },
    );
}

/// Convolve a volume with a 1D kernel along `direction`, in place.
///
/// The sweep decomposes the volume into 2D planes processed one at a time,
/// with the plane's row geometry chosen so the row convolver is oblivious to
/// the axis: sweeping X walks rows along `hop`, Y along `stride` and Z along
/// `leap`. Rows within a plane run in parallel; their output ranges are
/// disjoint, so no synchronization is needed on the buffer.
///
/// # Errors
///
/// Returns [`VoxprocError::KernelTooLarge`] if the kernel has at least as
/// many taps as the swept axis has voxels.
pub fn convolve_1d<T: Voxel>(
    volume: &mut VolumeViewMut<'_, T>,
    direction: Direction,
    kernel: &GaussianKernel1d,
) -> Result<(), VoxprocError> {
    let size = volume.size();
    let (hop, stride, leap) = volume.strides();

    let swept = match direction {
        Direction::X => size.width,
        Direction::Y => size.height,
        Direction::Z => size.depth,
    };
    if kernel.len() >= swept {
        return Err(VoxprocError::KernelTooLarge(kernel.len(), swept));
    }

    match direction {
        Direction::X => {
            for z in 0..size.depth {
                let plane = volume.plane_mut(z * leap, size.width, size.height, hop, stride)?;
                convolve_rows(&plane, kernel);
            }
        }
        Direction::Y => {
            for z in 0..size.depth {
                let plane = volume.plane_mut(z * leap, size.height, size.width, stride, hop)?;
                convolve_rows(&plane, kernel);
            }
        }
        Direction::Z => {
            for y in 0..size.height {
                let plane = volume.plane_mut(y * stride, size.depth, size.width, leap, hop)?;
                convolve_rows(&plane, kernel);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvox_volume::VolumeSize;

    // deterministic pseudo-random samples for oracle comparisons
    fn wavy(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| ((i * 37 + 11) % 101) as f32 * 0.37 - 18.0)
            .collect()
    }

    #[test]
    fn reference_matches_hand_computed_window() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let kernel = [0.25, 0.5, 0.25];
        let mut output = [0.0f32; 4];

        convolve_reference(&input, &kernel, &mut output);

        assert_eq!(output, [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn reference_applies_the_kernel_as_stored() {
        // an asymmetric kernel exposes the cross-correlation convention
        let input = [1.0, 0.0, 0.0];
        let kernel = [1.0, 2.0, 3.0];
        let mut output = [0.0f32; 1];

        convolve_reference(&input, &kernel, &mut output);

        assert_eq!(output, [1.0]);
    }

    #[test]
    fn blocked_is_bit_identical_to_reference() {
        for width in [1usize, 2, 3, 4, 5, 7, 8, 9, 16, 31, 64, 100] {
            for sigma in [0.0f32, 0.5, 1.0, 1.7, 2.6] {
                let kernel = GaussianKernel1d::with_default_tol(sigma);
                let taps = kernel.taps();
                let input = wavy(width + taps.len() - 1);

                let mut expected = vec![0.0f32; width];
                let mut actual = vec![0.0f32; width];
                convolve_reference(&input, taps, &mut expected);
                convolve_blocked(&input, taps, &mut actual);

                assert_eq!(expected, actual, "width {width} sigma {sigma}");
            }
        }
    }

    #[test]
    fn row_convolver_mirrors_the_edges() -> Result<(), VoxprocError> {
        let mut data = vec![10.0f32, 20.0, 30.0, 40.0];
        let size = VolumeSize {
            width: 4,
            height: 1,
            depth: 1,
        };
        let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
        let kernel = GaussianKernel1d::from_taps(vec![0.25, 0.5, 0.25]);

        convolve_1d(&mut volume, Direction::X, &kernel)?;
        drop(volume);

        assert_eq!(data, vec![15.0, 20.0, 30.0, 35.0]);
        Ok(())
    }

    #[test]
    fn ramp_interior_is_preserved_under_mirroring() -> Result<(), VoxprocError> {
        // on a ramp, a small symmetric kernel reproduces the signal away
        // from the edges and matches the mirror-extended oracle at them
        let width = 16usize;
        let mut data: Vec<f32> = (0..width).map(|u| u as f32).collect();
        let size = VolumeSize {
            width,
            height: 1,
            depth: 1,
        };
        let kernel = GaussianKernel1d::with_default_tol(1.0);
        let radius = kernel.radius();

        let mut mirrored = vec![0.0f32; width + 2 * radius];
        for u in 0..width {
            mirrored[radius + u] = u as f32;
        }
        for i in 0..radius {
            mirrored[radius - 1 - i] = mirrored[radius + i];
            mirrored[radius + width + i] = mirrored[radius + width - 1 - i];
        }
        let mut expected = vec![0.0f32; width];
        convolve_reference(&mirrored, kernel.taps(), &mut expected);

        let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
        convolve_1d(&mut volume, Direction::X, &kernel)?;
        drop(volume);

        assert_eq!(data, expected);
        Ok(())
    }

    #[test]
    fn identity_kernel_leaves_the_volume_bit_identical() -> Result<(), VoxprocError> {
        let size = VolumeSize {
            width: 4,
            height: 4,
            depth: 4,
        };
        let original: Vec<f32> = (0..size.num_voxels())
            .map(|i| {
                let x = i % 4;
                let y = (i / 4) % 4;
                let z = i / 16;
                (x + 2 * y + 3 * z) as f32
            })
            .collect();
        let kernel = GaussianKernel1d::with_default_tol(0.0);

        for direction in [Direction::X, Direction::Y, Direction::Z] {
            let mut data = original.clone();
            let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
            convolve_1d(&mut volume, direction, &kernel)?;
            drop(volume);
            assert_eq!(data, original, "direction {direction:?}");
        }
        Ok(())
    }

    #[test]
    fn axis_sweeps_commute_on_float_volumes() -> Result<(), VoxprocError> {
        let size = VolumeSize {
            width: 8,
            height: 8,
            depth: 4,
        };
        let original = wavy(size.num_voxels());
        let kernel = GaussianKernel1d::with_default_tol(1.0);

        let mut xy = original.clone();
        {
            let mut volume = VolumeViewMut::from_slice_mut(&mut xy, size)?;
            convolve_1d(&mut volume, Direction::X, &kernel)?;
            convolve_1d(&mut volume, Direction::Y, &kernel)?;
        }

        let mut yx = original.clone();
        {
            let mut volume = VolumeViewMut::from_slice_mut(&mut yx, size)?;
            convolve_1d(&mut volume, Direction::Y, &kernel)?;
            convolve_1d(&mut volume, Direction::X, &kernel)?;
        }

        for (a, b) in xy.iter().zip(yx.iter()) {
            let scale = a.abs().max(b.abs()).max(1.0);
            assert!((a - b).abs() / scale < 1e-4, "{a} vs {b}");
        }
        Ok(())
    }

    #[test]
    fn y_and_z_sweeps_convolve_the_right_axis() -> Result<(), VoxprocError> {
        // an impulse spreads only along the swept axis
        let size = VolumeSize {
            width: 5,
            height: 5,
            depth: 5,
        };
        let center = (2 * 5 + 2) * 5 + 2;
        let kernel = GaussianKernel1d::from_taps(vec![0.25, 0.5, 0.25]);

        for (direction, step) in [
            (Direction::X, 1usize),
            (Direction::Y, 5),
            (Direction::Z, 25),
        ] {
            let mut data = vec![0.0f32; size.num_voxels()];
            data[center] = 1.0;
            let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
            convolve_1d(&mut volume, direction, &kernel)?;
            drop(volume);

            assert_eq!(data[center], 0.5, "direction {direction:?}");
            assert_eq!(data[center - step], 0.25, "direction {direction:?}");
            assert_eq!(data[center + step], 0.25, "direction {direction:?}");
            let sum: f32 = data.iter().sum();
            assert_eq!(sum, 1.0, "direction {direction:?}");
        }
        Ok(())
    }

    #[test]
    fn strided_and_packed_sweeps_agree() -> Result<(), VoxprocError> {
        // the same logical volume stored packed and with padded rows
        let size = VolumeSize {
            width: 5,
            height: 3,
            depth: 2,
        };
        let packed = wavy(size.num_voxels());
        let kernel = GaussianKernel1d::from_taps(vec![0.25, 0.5, 0.25]);

        let mut plain = packed.clone();
        {
            let mut volume = VolumeViewMut::from_slice_mut(&mut plain, size)?;
            convolve_1d(&mut volume, Direction::X, &kernel)?;
        }

        // pad each row of 5 floats to 8
        let padded_stride = 8usize;
        let mut padded = vec![0.0f32; padded_stride * 3 * 2];
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..5 {
                    padded[(z * 3 + y) * padded_stride + x] = packed[(z * 3 + y) * 5 + x];
                }
            }
        }
        {
            let mut volume = VolumeViewMut::with_strides_mut(
                &mut padded,
                size,
                4,
                padded_stride * 4,
                padded_stride * 3 * 4,
            )?;
            convolve_1d(&mut volume, Direction::X, &kernel)?;
        }

        for z in 0..2 {
            for y in 0..3 {
                for x in 0..5 {
                    assert_eq!(
                        padded[(z * 3 + y) * padded_stride + x],
                        plain[(z * 3 + y) * 5 + x]
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn u8_rows_saturate_on_write_back() -> Result<(), VoxprocError> {
        let size = VolumeSize {
            width: 4,
            height: 1,
            depth: 1,
        };
        let mut data = vec![255u8, 255, 255, 255];
        let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
        // taps summing above one push interior samples past 255
        let kernel = GaussianKernel1d::from_taps(vec![0.5, 0.6, 0.5]);

        convolve_1d(&mut volume, Direction::X, &kernel)?;
        drop(volume);

        assert_eq!(data, vec![255u8; 4]);
        Ok(())
    }

    #[test]
    fn oversized_kernel_is_rejected() -> Result<(), VoxprocError> {
        let size = VolumeSize {
            width: 4,
            height: 4,
            depth: 2,
        };
        let mut data = vec![0.0f32; size.num_voxels()];
        let mut volume = VolumeViewMut::from_slice_mut(&mut data, size)?;
        // sigma 2.0 with default tolerance has radius 7, 15 taps
        let kernel = GaussianKernel1d::with_default_tol(2.0);

        assert_eq!(
            convolve_1d(&mut volume, Direction::X, &kernel),
            Err(VoxprocError::KernelTooLarge(15, 4))
        );
        // the depth axis is shorter still
        assert_eq!(
            convolve_1d(&mut volume, Direction::Z, &kernel),
            Err(VoxprocError::KernelTooLarge(15, 2))
        );
        Ok(())
    }
}
