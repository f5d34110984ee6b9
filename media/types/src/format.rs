/*!
    Pixel layout, sample dtype, and scaling algorithm types.
*/

/**
    Video pixel formats.

    This is a subset of formats commonly encountered in decode pipelines:
    the planar layouts codecs produce, and the packed RGB/gray layouts the
    frame converter targets. Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit (HDR content)
    Yuv420p10,
    /// Packed RGB, 24bpp, 8 bits per channel
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed BGRA, 32bpp
    Bgra,
    /// Single-plane grayscale, 8 bits per sample
    Gray8,
    /// Single-plane grayscale, 16 bits per sample, little-endian
    Gray16,
    /// Packed RGB, 48bpp, 16 bits per channel, little-endian
    Rgb48,
}

impl PixelFormat {
    /**
        Returns the number of bits per pixel for this format.

        For planar formats, this is the average bits per pixel.
    */
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Yuv420p | Self::Nv12 => 12,
            Self::Yuv420p10 => 15,
            Self::Yuv422p | Self::Gray16 => 16,
            Self::Rgb24 | Self::Bgr24 | Self::Yuv444p => 24,
            Self::Rgba | Self::Bgra => 32,
            Self::Gray8 => 8,
            Self::Rgb48 => 48,
        }
    }

    /**
        Returns true if this format stores chroma and luma in separate planes.
    */
    pub const fn is_planar(self) -> bool {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => true,
            Self::Nv12 => true, // semi-planar counts as planar
            Self::Rgb24 | Self::Bgr24 | Self::Rgba | Self::Bgra => false,
            Self::Gray8 | Self::Gray16 | Self::Rgb48 => false,
        }
    }
}

/**
    Element type of a converted output frame.

    `F16` has no native pixel layout in FFmpeg — conversion runs through the
    16-bit unsigned layout and a documented cast step rescales each sample
    linearly to `[0.0, 1.0]` afterwards.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameDtype {
    /// 8-bit unsigned samples.
    U8,
    /// 16-bit unsigned samples.
    U16,
    /// 16-bit IEEE float samples, produced by casting from `U16`.
    F16,
}

impl FrameDtype {
    /**
        Returns the number of bytes one sample occupies in the output array.
    */
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::F16 => 2,
        }
    }

    /**
        Returns true if this dtype requires the post-conversion float cast.
    */
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16)
    }
}

/**
    Scaling algorithm for pixel conversion and resizing.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalingAlgorithm {
    /// Nearest neighbor - fastest, lowest quality.
    Nearest,
    /// Bilinear interpolation - fast, acceptable quality.
    #[default]
    Bilinear,
    /// Bicubic interpolation - moderate speed, good quality.
    Bicubic,
    /// Area averaging - good for downscaling.
    Area,
    /// Lanczos resampling - slowest, highest quality.
    Lanczos,
}

static_assertions::assert_impl_all!(PixelFormat: Send, Sync);
static_assertions::assert_impl_all!(FrameDtype: Send, Sync);
static_assertions::assert_impl_all!(ScalingAlgorithm: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_format_bits_per_pixel() {
        assert_eq!(PixelFormat::Yuv420p.bits_per_pixel(), 12);
        assert_eq!(PixelFormat::Rgb24.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Gray8.bits_per_pixel(), 8);
        assert_eq!(PixelFormat::Rgb48.bits_per_pixel(), 48);
    }

    #[test]
    fn pixel_format_is_planar() {
        assert!(PixelFormat::Yuv420p.is_planar());
        assert!(PixelFormat::Nv12.is_planar());
        assert!(!PixelFormat::Rgb24.is_planar());
        assert!(!PixelFormat::Gray16.is_planar());
    }

    #[test]
    fn dtype_bytes_per_sample() {
        assert_eq!(FrameDtype::U8.bytes_per_sample(), 1);
        assert_eq!(FrameDtype::U16.bytes_per_sample(), 2);
        assert_eq!(FrameDtype::F16.bytes_per_sample(), 2);
    }

    #[test]
    fn dtype_is_float() {
        assert!(FrameDtype::F16.is_float());
        assert!(!FrameDtype::U8.is_float());
        assert!(!FrameDtype::U16.is_float());
    }

    #[test]
    fn default_algorithm_is_bilinear() {
        assert_eq!(ScalingAlgorithm::default(), ScalingAlgorithm::Bilinear);
    }
}
