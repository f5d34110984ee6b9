/*!
    Pixel format mapping between ffmpeg-next and vidarray-types.
*/

use ffmpeg_next::format::Pixel;

use vidarray_types::{Error, PixelFormat, Result};

pub(crate) fn pixel_format_from_ffmpeg(format: Pixel) -> Option<PixelFormat> {
    match format {
        Pixel::YUV420P | Pixel::YUVJ420P => Some(PixelFormat::Yuv420p),
        Pixel::NV12 => Some(PixelFormat::Nv12),
        Pixel::YUV422P | Pixel::YUVJ422P => Some(PixelFormat::Yuv422p),
        Pixel::YUV444P | Pixel::YUVJ444P => Some(PixelFormat::Yuv444p),
        Pixel::YUV420P10LE | Pixel::YUV420P10BE => Some(PixelFormat::Yuv420p10),
        Pixel::RGB24 => Some(PixelFormat::Rgb24),
        Pixel::BGR24 => Some(PixelFormat::Bgr24),
        Pixel::RGBA => Some(PixelFormat::Rgba),
        Pixel::BGRA => Some(PixelFormat::Bgra),
        Pixel::GRAY8 => Some(PixelFormat::Gray8),
        Pixel::GRAY16LE => Some(PixelFormat::Gray16),
        Pixel::RGB48LE => Some(PixelFormat::Rgb48),
        _ => None,
    }
}

pub(crate) fn pixel_format_to_ffmpeg(format: PixelFormat) -> Result<Pixel> {
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
