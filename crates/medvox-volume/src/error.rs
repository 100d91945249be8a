use thiserror::Error;

/// An error type for volume view construction and validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VolumeError {
    /// Error when a volume dimension is zero.
    #[error("Volume dimensions must be at least 1x1x1, got {0}x{1}x{2}")]
    InvalidDimensions(usize, usize, usize),

    /// Error when the caller's buffer holds fewer elements than the volume.
    #[error("Buffer holds {0} elements but the volume needs {1}")]
    BufferTooSmall(usize, usize),

    /// Error when a strided layout addresses bytes past the end of the buffer.
    #[error("Strided view needs {0} bytes but the buffer holds {1}")]
    ViewOutOfBounds(usize, usize),

    /// Error when a byte offset of zero is given for an axis of extent > 1.
    #[error("Byte offset along an axis of extent > 1 must be at least the element size")]
    AliasedLayout,

    /// Error when a direction index is outside {0, 1, 2}.
    #[error("Direction index {0} is out of range")]
    InvalidDirection(u8),
}
