/*!
    Pixel conversion context.
*/

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use vidarray_decode::FrameBuf;
use vidarray_types::{Error, FrameFormat, PixelFormat, Result, ScalingAlgorithm};

/**
    A pixel conversion context bound to one (source geometry, target format)
    pair.

    Converts frames from the decoder's native layout and resolution into the
    target descriptor's packed layout, writing row-compacted bytes into a
    caller-supplied buffer. The conversion is a pure transform: the same
    source frame always yields the same destination bytes.

    Source dimensions are fixed per session, so a scaler never needs
    reinitialization — build one per distinct [`FrameFormat`] and reuse it
    (see [`ScalerCache`](crate::ScalerCache)).
*/
pub struct Scaler {
    context: ScalerContext,
    /// Reusable destination frame the sws context writes into.
    dst_frame: VideoFrameFFmpeg,
    target: FrameFormat,
    src_width: u32,
    src_height: u32,
}

impl Scaler {
    /**
        Create a conversion context from the fixed source geometry to the
        target descriptor.

        Fails when the native scaler rejects the layout combination — no data
        can be produced for the descriptor in that case.
    */
    pub fn new(
        src_width: u32,
        src_height: u32,
        src_format: PixelFormat,
        target: &FrameFormat,
    ) -> Result<Self> {
        let src_pixel = pixel_format_to_ffmpeg(src_format)?;
        let dst_pixel = pixel_format_to_ffmpeg(target.pixel_format())?;

        let context = ScalerContext::get(
            src_pixel,
            src_width,
            src_height,
            dst_pixel,
            target.width(),
            target.height(),
            algorithm_to_flags(target.algorithm()),
        )
        .map_err(|e| Error::codec(format!("failed to create conversion context: {e}")))?;

        let dst_frame = VideoFrameFFmpeg::new(dst_pixel, target.width(), target.height());

        Ok(Self {
            context,
            dst_frame,
            target: *target,
            src_width,
            src_height,
        })
    }

    /**
        The target descriptor this context converts into.
    */
    pub fn target(&self) -> &FrameFormat {
        &self.target
    }

    /**
        Convert a native frame into the destination buffer.

        `dst` must be exactly [`FrameFormat::byte_len`] bytes and receives
        row-compacted pixel data (no stride padding). A destination of the
        wrong length, or a source frame whose geometry does not match the
        configured source, is a contract violation and fails loudly.
    */
    pub fn run(&mut self, frame: &FrameBuf, dst: &mut [u8]) -> Result<()> {
        if frame.width() != self.src_width || frame.height() != self.src_height {
            return Err(Error::invalid_data(format!(
                "source frame is {}x{} but the conversion context expects {}x{}",
                frame.width(),
                frame.height(),
                self.src_width,
                self.src_height
            )));
        }
        if dst.len() != self.target.byte_len() {
            return Err(Error::invalid_data(format!(
                "destination buffer is {} bytes but the target format needs {}",
                dst.len(),
                self.target.byte_len()
            )));
        }

        self.context
            .run(frame.as_ffmpeg(), &mut self.dst_frame)
            .map_err(|e| Error::codec(format!("pixel conversion failed: {e}")))?;

        // All target layouts are single-plane packed; strip the stride.
        let row_bytes = self.target.width() as usize
            * self.target.channels() as usize
            * self.target.dtype().bytes_per_sample();
        let stride = self.dst_frame.stride(0);
        let data = self.dst_frame.data(0);
        for y in 0..self.target.height() as usize {
            let src_start = y * stride;
            dst[y * row_bytes..(y + 1) * row_bytes]
                .copy_from_slice(&data[src_start..src_start + row_bytes]);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Scaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scaler")
            .field("src", &format_args!("{}x{}", self.src_width, self.src_height))
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

fn algorithm_to_flags(algorithm: ScalingAlgorithm) -> ScalerFlags {
    match algorithm {
        ScalingAlgorithm::Nearest => ScalerFlags::POINT,
        ScalingAlgorithm::Bilinear => ScalerFlags::BILINEAR,
        ScalingAlgorithm::Bicubic => ScalerFlags::BICUBIC,
        ScalingAlgorithm::Area => ScalerFlags::AREA,
        ScalingAlgorithm::Lanczos => ScalerFlags::LANCZOS,
    }
}

fn pixel_format_to_ffmpeg(format: PixelFormat) -> Result<Pixel> {
    match format {
        PixelFormat::Yuv420p => Ok(Pixel::YUV420P),
        PixelFormat::Nv12 => Ok(Pixel::NV12),
        PixelFormat::Yuv422p => Ok(Pixel::YUV422P),
        PixelFormat::Yuv444p => Ok(Pixel::YUV444P),
        PixelFormat::Yuv420p10 => Ok(Pixel::YUV420P10LE),
        PixelFormat::Rgb24 => Ok(Pixel::RGB24),
        PixelFormat::Bgr24 => Ok(Pixel::BGR24),
        PixelFormat::Rgba => Ok(Pixel::RGBA),
        PixelFormat::Bgra => Ok(Pixel::BGRA),
        PixelFormat::Gray8 => Ok(Pixel::GRAY8),
        PixelFormat::Gray16 => Ok(Pixel::GRAY16LE),
        PixelFormat::Rgb48 => Ok(Pixel::RGB48LE),
        _ => Err(Error::unsupported_format(format!(
            "pixel format {format:?} has no ffmpeg mapping"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidarray_types::FrameDtype;

    fn uniform_yuv_frame(width: u32, height: u32, luma: u8) -> FrameBuf {
        let mut frame = FrameBuf::alloc(PixelFormat::Yuv420p, width, height).unwrap();
        frame.plane_mut(0).fill(luma);
        frame.plane_mut(1).fill(128);
        frame.plane_mut(2).fill(128);
        frame
    }

    #[test]
    fn converts_uniform_frame_to_uniform_gray() {
        ffmpeg_next::init().unwrap();
        let frame = uniform_yuv_frame(64, 48, 128);
        let target = FrameFormat::new(24, 32, 1, FrameDtype::U8).unwrap();
        let mut scaler = Scaler::new(64, 48, PixelFormat::Yuv420p, &target).unwrap();

        let mut dst = vec![0u8; target.byte_len()];
        scaler.run(&frame, &mut dst).unwrap();

        // A uniform input stays uniform through scale + layout conversion.
        let first = dst[0];
        assert!(dst.iter().all(|&b| b == first));
    }

    #[test]
    fn converts_to_rgb_with_matching_length() {
        ffmpeg_next::init().unwrap();
        let frame = uniform_yuv_frame(64, 48, 90);
        let target = FrameFormat::new(48, 64, 3, FrameDtype::U8).unwrap();
        let mut scaler = Scaler::new(64, 48, PixelFormat::Yuv420p, &target).unwrap();

        let mut dst = vec![0u8; target.byte_len()];
        scaler.run(&frame, &mut dst).unwrap();
        assert_eq!(dst.len(), 48 * 64 * 3);
    }

    #[test]
    fn sixteen_bit_target_doubles_the_buffer() {
        ffmpeg_next::init().unwrap();
        let frame = uniform_yuv_frame(64, 48, 200);
        let target = FrameFormat::new(48, 64, 3, FrameDtype::U16).unwrap();
        let mut scaler = Scaler::new(64, 48, PixelFormat::Yuv420p, &target).unwrap();

        let mut dst = vec![0u8; target.byte_len()];
        scaler.run(&frame, &mut dst).unwrap();
        assert_eq!(dst.len(), 48 * 64 * 3 * 2);
        // Bright input must produce non-zero 16-bit samples.
        assert!(dst.iter().any(|&b| b != 0));
    }

    #[test]
    fn wrong_destination_length_fails_loudly() {
        ffmpeg_next::init().unwrap();
        let frame = uniform_yuv_frame(64, 48, 128);
        let target = FrameFormat::new(48, 64, 3, FrameDtype::U8).unwrap();
        let mut scaler = Scaler::new(64, 48, PixelFormat::Yuv420p, &target).unwrap();

        let mut dst = vec![0u8; target.byte_len() - 1];
        let result = scaler.run(&frame, &mut dst);
        assert!(matches!(result, Err(Error::InvalidData { .. })));
    }

    #[test]
    fn mismatched_source_geometry_fails_loudly() {
        ffmpeg_next::init().unwrap();
        let frame = uniform_yuv_frame(32, 32, 128);
        let target = FrameFormat::new(32, 32, 3, FrameDtype::U8).unwrap();
        let mut scaler = Scaler::new(64, 48, PixelFormat::Yuv420p, &target).unwrap();

        let mut dst = vec![0u8; target.byte_len()];
        let result = scaler.run(&frame, &mut dst);
        assert!(matches!(result, Err(Error::InvalidData { .. })));
    }
}
