/*!
    Reusable decoded-frame buffer.
*/

use ffmpeg_next::util::frame::video::Video as VideoFrameFFmpeg;

use vidarray_types::{PixelFormat, Result};

use crate::convert::{pixel_format_from_ffmpeg, pixel_format_to_ffmpeg};

/**
    A reusable buffer holding one decoded frame in the decoder's native
    pixel layout.

    The decoder releases the previous contents before filling the buffer on
    every [`receive_into`] call, so a single `FrameBuf` serves an entire
    decode session without per-frame allocation.

    [`receive_into`]: crate::VideoDecoder::receive_into
*/
pub struct FrameBuf {
    inner: VideoFrameFFmpeg,
}

impl FrameBuf {
    /**
        Create an empty frame buffer for the decoder to fill.
    */
    pub fn empty() -> Self {
        Self {
            inner: VideoFrameFFmpeg::empty(),
        }
    }

    /**
        Allocate a frame buffer with the given layout and dimensions.

        Useful for feeding synthetic frames into a converter; the decode loop
        itself only needs [`FrameBuf::empty`]. Plane contents start
        uninitialized — fill them through [`FrameBuf::plane_mut`].
    */
    pub fn alloc(format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        let pixel = pixel_format_to_ffmpeg(format)?;
        Ok(Self {
            inner: VideoFrameFFmpeg::new(pixel, width, height),
        })
    }

    /**
        Frame width in pixels (0 while the buffer is empty).
    */
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /**
        Frame height in pixels (0 while the buffer is empty).
    */
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /**
        Pixel layout of the current contents, when it maps to a known format.
    */
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        pixel_format_from_ffmpeg(self.inner.format())
    }

    /**
        Number of data planes in the current contents.
    */
    pub fn planes(&self) -> usize {
        self.inner.planes()
    }

    /**
        Line stride of one plane in bytes.
    */
    pub fn stride(&self, plane: usize) -> usize {
        self.inner.stride(plane)
    }

    /**
        Read access to one plane's bytes.
    */
    pub fn plane(&self, plane: usize) -> &[u8] {
        self.inner.data(plane)
    }

    /**
        Write access to one plane's bytes.
    */
    pub fn plane_mut(&mut self, plane: usize) -> &mut [u8] {
        self.inner.data_mut(plane)
    }

    /**
        Access the underlying ffmpeg frame.

        Bridging accessor for the transform crate.
    */
    pub fn as_ffmpeg(&self) -> &VideoFrameFFmpeg {
        &self.inner
    }

    /**
        Mutable access to the underlying ffmpeg frame.
    */
    pub fn as_ffmpeg_mut(&mut self) -> &mut VideoFrameFFmpeg {
        &mut self.inner
    }
}

impl Default for FrameBuf {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for FrameBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuf")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixel_format", &self.pixel_format())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_zero_dimensions() {
        let buf = FrameBuf::empty();
        assert_eq!(buf.width(), 0);
        assert_eq!(buf.height(), 0);
    }

    #[test]
    fn alloc_planar_frame() {
        let mut buf = FrameBuf::alloc(PixelFormat::Yuv420p, 64, 48).unwrap();
        assert_eq!(buf.width(), 64);
        assert_eq!(buf.height(), 48);
        assert_eq!(buf.pixel_format(), Some(PixelFormat::Yuv420p));
        assert_eq!(buf.planes(), 3);

        // Planes are writable after allocation.
        buf.plane_mut(0).fill(16);
        assert!(buf.plane(0).iter().all(|&b| b == 16));
    }

    #[test]
    fn alloc_packed_frame_has_one_plane() {
        let buf = FrameBuf::alloc(PixelFormat::Rgb24, 32, 32).unwrap();
        assert_eq!(buf.planes(), 1);
        assert!(buf.stride(0) >= 32 * 3);
    }
}
