//! Connected-component labeling of 3D volumes.
//!
//! A single-pass union-find sweep builds the equivalence forest of
//! same-valued, face-adjacent foreground voxels; a second pass assigns
//! compact labels in scan order, writes the label volume and aggregates
//! per-component statistics. Connectivity is strictly 6-connected: voxels
//! touching only across an edge or corner belong to different components.

mod disjoint_set;

use log::debug;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

use medvox_volume::{VolumeSize, VolumeView, VolumeViewMut};

use crate::error::VoxprocError;
use disjoint_set::Forest;

/// Per-component aggregate produced by the labeling pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ComponentStatistics<T> {
    /// Number of voxels carrying this label.
    pub pixel_count: u32,
    /// Input value of the first voxel that claimed the label; the background
    /// entry carries the background value.
    pub input_label: T,
}

impl ComponentStatistics<u8> {
    /// Wire layout of one statistics row: the 32-bit little-endian voxel
    /// count followed by the one-byte input value.
    pub fn to_le_bytes(&self) -> [u8; 5] {
        let count = self.pixel_count.to_le_bytes();
        [count[0], count[1], count[2], count[3], self.input_label]
    }
}

/// Label the 6-connected components of `input` into `output`.
///
/// Voxels equal to `background` all receive `background_label`; every
/// maximal set of face-adjacent foreground voxels sharing one input value
/// receives its own label, assigned in scan order with the counter skipping
/// past the reserved background label. The returned statistics hold one row
/// per label, indexed by label value.
///
/// The engine is single-threaded by contract: both passes mutate the
/// union-find forest, and path compression rewrites arbitrary ancestors.
///
/// # Errors
///
/// * [`VoxprocError::ShapeMismatch`] when input and output sizes differ.
/// * [`VoxprocError::VolumeTooLarge`] when the forest cannot address the
///   volume.
/// * [`VoxprocError::GraphOverflow`] on union-find rank overflow.
/// * [`VoxprocError::TooManyComponents`] when the label counter would pass
///   the ceiling of `U`.
pub fn find_connected_components_3d<T, U>(
    input: &VolumeView<'_, T>,
    background: T,
    output: &mut VolumeViewMut<'_, U>,
    background_label: U,
) -> Result<Vec<ComponentStatistics<T>>, VoxprocError>
where
    T: Copy + PartialEq,
    U: PrimInt + Unsigned + AsPrimitive<usize>,
{
    let size = input.size();
    if output.size() != size {
        return Err(VoxprocError::ShapeMismatch(size, output.size()));
    }

    let VolumeSize {
        width,
        height,
        depth,
    } = size;
    let mut forest = Forest::<U>::new(size.num_voxels())?;
    let slice_len = (width * height) as u32;

    // Pass 1: unite every foreground voxel with its already-visited,
    // equal-valued face neighbors: back (z-1), left (x-1), up (y-1).
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let value = input.read(x, y, z);
                if value == background {
                    continue;
                }
                let index = ((z * height + y) * width + x) as u32;
                if z > 0 && input.read(x, y, z - 1) == value {
                    forest.unite(index, index - slice_len)?;
                }
                if x > 0 && input.read(x - 1, y, z) == value {
                    forest.unite(index, index - 1)?;
                }
                if y > 0 && input.read(x, y - 1, z) == value {
                    forest.unite(index, index - width as u32)?;
                }
            }
        }
    }

    // Pass 2: assign labels in scan order and aggregate statistics.
    let mut statistics: Vec<ComponentStatistics<T>> = Vec::new();
    let mut next = U::zero();
    if next == background_label {
        next = next + U::one();
        statistics.push(ComponentStatistics {
            pixel_count: 0,
            input_label: background,
        });
    }

    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let value = input.read(x, y, z);
                let label = if value == background {
                    background_label
                } else {
                    let index = ((z * height + y) * width + x) as u32;
                    let root = forest.find(index);
                    match forest.label(root) {
                        Some(existing) => existing,
                        None => {
                            let assigned = next;
                            forest.set_label(root, assigned);
                            if next == U::max_value() {
                                return Err(VoxprocError::TooManyComponents);
                            }
                            next = next + U::one();
                            statistics.push(ComponentStatistics {
                                pixel_count: 0,
                                input_label: value,
                            });
                            if next == background_label {
                                if next == U::max_value() {
                                    return Err(VoxprocError::TooManyComponents);
                                }
                                next = next + U::one();
                                statistics.push(ComponentStatistics {
                                    pixel_count: 0,
                                    input_label: background,
                                });
                            }
                            assigned
                        }
                    }
                };
                output.write(x, y, z, label);
                statistics[label.as_()].pixel_count += 1;
            }
        }
    }

    debug!(
        "connected components: {} labels over {size}",
        statistics.len()
    );
    Ok(statistics)
}

/// Label the 6-connected components of a packed u8 volume into a parallel
/// u16 label volume, reserving label 0 for `background`.
///
/// Returns the number of statistics rows, i.e. the highest assigned label
/// plus one.
///
/// # Errors
///
/// As for [`find_connected_components_3d`], plus the buffer validation
/// errors of the packed views.
///
/// # Examples
///
/// ```
/// use medvox_volume::VolumeSize;
/// use medvox_voxproc::components::find_connected_components;
///
/// let size = VolumeSize {
///     width: 4,
///     height: 1,
///     depth: 1,
/// };
/// let input: Vec<u8> = vec![5, 5, 0, 7];
/// let mut labels = vec![0u16; 4];
///
/// let count = find_connected_components(&input, size, 0, &mut labels).unwrap();
///
/// assert_eq!(count, 3);
/// assert_eq!(labels, vec![1, 1, 0, 2]);
/// ```
pub fn find_connected_components(
    input: &[u8],
    size: VolumeSize,
    background: u8,
    output: &mut [u16],
) -> Result<usize, VoxprocError> {
    let statistics = find_connected_components_with_statistics(input, size, background, output)?;
    Ok(statistics.len())
}

/// Label the 6-connected components of a packed u8 volume and return the
/// per-component statistics.
///
/// Identical to [`find_connected_components`] but hands the statistics table
/// back to the caller: one row per label with the voxel count and the input
/// value of the first voxel that claimed the label.
///
/// # Errors
///
/// As for [`find_connected_components`].
pub fn find_connected_components_with_statistics(
    input: &[u8],
    size: VolumeSize,
    background: u8,
    output: &mut [u16],
) -> Result<Vec<ComponentStatistics<u8>>, VoxprocError> {
    let input = VolumeView::from_slice(input, size)?;
    let mut labels = VolumeViewMut::from_slice_mut(output, size)?;
    find_connected_components_3d(&input, background, &mut labels, 0u16)
}
