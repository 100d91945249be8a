#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error module containing the volume error types.
pub mod error;

/// view module containing the borrowed strided volume views.
pub mod view;

/// voxel module containing the voxel sample codecs.
pub mod voxel;

pub use crate::error::VolumeError;
pub use crate::view::{Direction, PlaneMut, RowMut, VolumeSize, VolumeView, VolumeViewMut};
pub use crate::voxel::Voxel;
