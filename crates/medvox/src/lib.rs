#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// volume module containing views, sizes and voxel codecs.
pub mod volume {
    pub use medvox_volume::*;
}

/// voxproc module containing the filtering and labeling operations.
pub mod voxproc {
    pub use medvox_voxproc::*;
}
