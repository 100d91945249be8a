use medvox_volume::{VolumeError, VolumeSize};
use thiserror::Error;

/// An error type for the volume processing operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VoxprocError {
    /// Error bubbled up from view construction and validation.
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// Error when paired argument arrays differ in length.
    #[error("Paired arguments differ in length: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// Error when the input and output volumes differ in shape.
    #[error("Input volume {0} and output volume {1} differ in shape")]
    ShapeMismatch(VolumeSize, VolumeSize),

    /// Error when a kernel has at least as many taps as the swept axis has
    /// voxels, so no valid output would remain after edge handling.
    #[error("Kernel of {0} taps does not fit an axis of {1} voxels")]
    KernelTooLarge(usize, usize),

    /// Error when a union-find rank would exceed its numeric ceiling.
    #[error("Connected components graph overflow")]
    GraphOverflow,

    /// Error when the number of components would exceed the label type.
    #[error("Too many components during connected component analysis")]
    TooManyComponents,

    /// Error when a volume holds more voxels than the node links can address.
    #[error("Volume of {0} voxels exceeds the addressable node limit")]
    VolumeTooLarge(usize),

    /// Error for a failed internal postcondition; raised only by self-tests.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}
