/// Conversions between a stored voxel sample and the f32 working type.
///
/// The filtering engine reads every supported pixel representation through
/// a widening conversion to f32, convolves in f32, and writes back with a
/// rounding, saturating narrowing conversion. The set of implementors is
/// exactly the set of supported pixel types; inner loops monomorphize per
/// type rather than dispatching per voxel.
pub trait Voxel: Copy + PartialEq + Send + Sync + 'static {
    /// Widen the stored sample to f32.
    fn to_f32(self) -> f32;

    /// Narrow an f32 back to the stored type, rounding and saturating.
    ///
    /// Integer types add 0.5 and truncate toward zero, then clamp to the
    /// type's range. This is not IEEE round-half-even; the behavior is part
    /// of the library's output contract.
    fn from_f32(x: f32) -> Self;
}

impl Voxel for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl Voxel for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32(x: f32) -> Self {
        if x <= 0.0 {
            0
        } else if x > 255.0 {
            255
        } else {
            (x + 0.5) as u8
        }
    }
}

impl Voxel for i16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32(x: f32) -> Self {
        if x <= f32::from(i16::MIN) {
            i16::MIN
        } else if x > f32::from(i16::MAX) {
            i16::MAX
        } else {
            (x + 0.5) as i16
        }
    }
}
