/*!
    Array-side output types and the u16 → f16 cast step.
*/

use half::f16;
use ndarray::Array3;

use vidarray_types::FrameDtype;

/**
    Sample types a frame array can hold.

    Maps each supported element type to its [`FrameDtype`], letting output
    descriptors be resolved from an array's element type.
*/
pub trait FrameSample: bytemuck::Pod + Default {
    /// The dtype this element type carries.
    const DTYPE: FrameDtype;
}

impl FrameSample for u8 {
    const DTYPE: FrameDtype = FrameDtype::U8;
}

impl FrameSample for u16 {
    const DTYPE: FrameDtype = FrameDtype::U16;
}

impl FrameSample for f16 {
    const DTYPE: FrameDtype = FrameDtype::F16;
}

/**
    One decoded, converted frame, shaped `height × width × channels`.

    The variant matches the dtype of the [`FrameFormat`] that produced it.

    [`FrameFormat`]: vidarray_types::FrameFormat
*/
#[derive(Clone, Debug)]
pub enum FrameArray {
    /// 8-bit unsigned samples.
    U8(Array3<u8>),
    /// 16-bit unsigned samples.
    U16(Array3<u16>),
    /// 16-bit float samples in `[0.0, 1.0]`.
    F16(Array3<f16>),
}

impl FrameArray {
    /**
        The dtype of the contained samples.
    */
    pub fn dtype(&self) -> FrameDtype {
        match self {
            Self::U8(_) => FrameDtype::U8,
            Self::U16(_) => FrameDtype::U16,
            Self::F16(_) => FrameDtype::F16,
        }
    }

    /**
        Shape as (height, width, channels).
    */
    pub fn shape(&self) -> (usize, usize, usize) {
        let dim = |s: &[usize]| (s[0], s[1], s[2]);
        match self {
            Self::U8(a) => dim(a.shape()),
            Self::U16(a) => dim(a.shape()),
            Self::F16(a) => dim(a.shape()),
        }
    }

    /**
        Borrow the u8 array, if that is the contained dtype.
    */
    pub fn as_u8(&self) -> Option<&Array3<u8>> {
        match self {
            Self::U8(a) => Some(a),
            _ => None,
        }
    }

    /**
        Borrow the u16 array, if that is the contained dtype.
    */
    pub fn as_u16(&self) -> Option<&Array3<u16>> {
        match self {
            Self::U16(a) => Some(a),
            _ => None,
        }
    }

    /**
        Borrow the f16 array, if that is the contained dtype.
    */
    pub fn as_f16(&self) -> Option<&Array3<f16>> {
        match self {
            Self::F16(a) => Some(a),
            _ => None,
        }
    }
}

/**
    The explicit f16 cast step.

    FFmpeg has no float pixel formats, so float output converts through the
    16-bit unsigned layout first; this step rescales each sample linearly
    from `[0, 65535]` to `[0.0, 1.0]` as IEEE half-precision.
*/
pub(crate) fn cast_u16_to_f16(src: &[u16], dst: &mut [f16]) {
    debug_assert_eq!(src.len(), dst.len());
    const SCALE: f32 = 1.0 / u16::MAX as f32;
    for (d, s) in dst.iter_mut().zip(src) {
        *d = f16::from_f32(f32::from(*s) * SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_sample_dtypes() {
        assert_eq!(u8::DTYPE, FrameDtype::U8);
        assert_eq!(u16::DTYPE, FrameDtype::U16);
        assert_eq!(f16::DTYPE, FrameDtype::F16);
    }

    #[test]
    fn frame_array_shape_and_dtype() {
        let array = FrameArray::U8(Array3::from_elem((48, 64, 3), 0u8));
        assert_eq!(array.shape(), (48, 64, 3));
        assert_eq!(array.dtype(), FrameDtype::U8);
        assert!(array.as_u8().is_some());
        assert!(array.as_u16().is_none());
    }

    #[test]
    fn cast_rescales_to_unit_range() {
        let src = [0u16, u16::MAX / 2, u16::MAX];
        let mut dst = [f16::default(); 3];
        cast_u16_to_f16(&src, &mut dst);

        assert_eq!(dst[0].to_f32(), 0.0);
        assert!((dst[1].to_f32() - 0.5).abs() < 1e-3);
        assert_eq!(dst[2].to_f32(), 1.0);
    }
}
