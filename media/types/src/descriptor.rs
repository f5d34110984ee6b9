/*!
    Output frame format descriptor.
*/

use crate::{Error, FrameDtype, PixelFormat, Result, ScalingAlgorithm};

/**
    Describes a desired output frame: dimensions, channel count, sample dtype,
    and scaling algorithm, together with the native pixel layout derived from
    the dtype × channel combination.

    The derived layout is not independently settable — construction fails for
    combinations with no native layout (only 1 and 3 channels are supported).
    `F16` reuses the 16-bit unsigned layouts; the float cast happens after
    conversion.

    The descriptor is immutable after construction and is used as the lookup
    key for cached conversion contexts, so equality and hashing are structural
    over every field, including the derived layout.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFormat {
    height: u32,
    width: u32,
    channels: u32,
    dtype: FrameDtype,
    algorithm: ScalingAlgorithm,
    pixel_format: PixelFormat,
}

impl FrameFormat {
    /**
        Create a descriptor for the given output shape and dtype.

        Fails with [`Error::UnsupportedFormat`] when the dtype × channel
        combination maps to no native pixel layout, and with
        [`Error::InvalidData`] for zero-sized dimensions.
    */
    pub fn new(height: u32, width: u32, channels: u32, dtype: FrameDtype) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::invalid_data(format!(
                "output dimensions must be non-zero, got {width}x{height}"
            )));
        }

        let pixel_format = match (dtype, channels) {
            (FrameDtype::U8, 3) => PixelFormat::Rgb24,
            (FrameDtype::U8, 1) => PixelFormat::Gray8,
            // No native float layouts; F16 converts through the u16 layouts.
            (FrameDtype::U16 | FrameDtype::F16, 3) => PixelFormat::Rgb48,
            (FrameDtype::U16 | FrameDtype::F16, 1) => PixelFormat::Gray16,
            _ => {
                return Err(Error::unsupported_format(format!(
                    "no native pixel layout for {channels} channel(s) with {dtype:?} samples; \
                     only 1 channel gray or 3 channel RGB output is supported"
                )));
            }
        };

        Ok(Self {
            height,
            width,
            channels,
            dtype,
            algorithm: ScalingAlgorithm::default(),
            pixel_format,
        })
    }

    /**
        Descriptor mirroring a native decode resolution: 3 channels, `U8`.
    */
    pub fn native(width: u32, height: u32) -> Result<Self> {
        Self::new(height, width, 3, FrameDtype::U8)
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /**
        Output height in pixels.
    */
    pub fn height(&self) -> u32 {
        self.height
    }

    /**
        Output width in pixels.
    */
    pub fn width(&self) -> u32 {
        self.width
    }

    /**
        Output channel count (1 or 3).
    */
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /**
        Output sample dtype.
    */
    pub fn dtype(&self) -> FrameDtype {
        self.dtype
    }

    /**
        Scaling algorithm used when converting into this format.
    */
    pub fn algorithm(&self) -> ScalingAlgorithm {
        self.algorithm
    }

    /**
        The native pixel layout the converter produces for this descriptor.
    */
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /**
        Number of samples in one output frame (height × width × channels).
    */
    pub fn sample_len(&self) -> usize {
        self.height as usize * self.width as usize * self.channels as usize
    }

    /**
        Number of bytes one output frame occupies.
    */
    pub fn byte_len(&self) -> usize {
        self.sample_len() * self.dtype.bytes_per_sample()
    }
}

static_assertions::assert_impl_all!(FrameFormat: Send, Sync);
