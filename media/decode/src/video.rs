/*!
    Video decoder implementation.
*/

use ffmpeg_next::{codec, ffi};

use vidarray_source::{CodecConfig, PacketBuf};
use vidarray_types::{Error, PixelFormat, Result};

use crate::convert::pixel_format_from_ffmpeg;
use crate::frame::FrameBuf;

/**
    Outcome of submitting input to the decoder.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendResult {
    /// The decoder accepted the input.
    Accepted,
    /// The decoder's output buffer is full — receive frames, then resubmit.
    Full,
}

/**
    Video decoder.

    Wraps an opened decoder context bound to one stream's codec parameters.
    Decoding is an explicit two-phase machine: [`send`](Self::send) submits a
    compressed packet, [`receive_into`](Self::receive_into) pulls the next
    completed frame when the decoder signals one. B-frame reordering means a
    packet may complete zero frames and a later packet may complete several.
*/
pub struct VideoDecoder {
    decoder: codec::decoder::Video,
    pixel_format: PixelFormat,
}

impl VideoDecoder {
    /**
        Create a video decoder from the active stream's codec configuration.

        Fails when the decoder context cannot be allocated or opened, or when
        the stream's pixel format is not representable — construction errors
        are fatal and leave no partially usable decoder.
    */
    pub fn from_config(config: CodecConfig) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let decoder_ctx = codec::context::Context::from_parameters(config.into_parameters())
            .map_err(|e| Error::codec(e.to_string()))?;

        let decoder = decoder_ctx
            .decoder()
            .video()
            .map_err(|e| Error::codec(e.to_string()))?;

        let pixel_format = pixel_format_from_ffmpeg(decoder.format()).ok_or_else(|| {
            Error::unsupported_format(format!(
                "decoder reports pixel format {:?}, which has no supported mapping",
                decoder.format()
            ))
        })?;

        log::debug!(
            "opened video decoder: {}x{} {:?}",
            decoder.width(),
            decoder.height(),
            pixel_format
        );

        Ok(Self {
            decoder,
            pixel_format,
        })
    }

    /**
        Decoder-reported frame width in pixels.
    */
    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    /**
        Decoder-reported frame height in pixels.
    */
    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    /**
        Native pixel layout the decoder produces.
    */
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /**
        Submit one compressed packet to the decoder.

        Returns [`SendResult::Full`] when the decoder's output buffer must be
        drained first; the packet is untouched and can be resubmitted. A
        decode error for an individual packet is returned as
        [`Error::Codec`] — callers may drop the packet and continue, the
        decoder recovers on the next keyframe.
    */
    pub fn send(&mut self, packet: &PacketBuf) -> Result<SendResult> {
        match self.decoder.send_packet(packet.as_ffmpeg()) {
            Ok(()) => Ok(SendResult::Accepted),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                Ok(SendResult::Full)
            }
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }

    /**
        Signal end of stream so the decoder flushes buffered frames.

        Returns [`SendResult::Full`] when pending frames must be received
        before the signal is accepted. Safe to call more than once.
    */
    pub fn send_eof(&mut self) -> Result<SendResult> {
        match self.decoder.send_eof() {
            Ok(()) => Ok(SendResult::Accepted),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                Ok(SendResult::Full)
            }
            // Already flushing; nothing more to signal.
            Err(ffmpeg_next::Error::Eof) => Ok(SendResult::Accepted),
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }

    /**
        Pull the next completed frame into the reusable frame buffer.

        Returns `true` when a frame landed in `frame`, `false` when the
        decoder needs more input (or is fully drained after
        [`send_eof`](Self::send_eof)). The buffer's previous contents are
        released before the new frame lands.
    */
    pub fn receive_into(&mut self, frame: &mut FrameBuf) -> Result<bool> {
        match self.decoder.receive_frame(frame.as_ffmpeg_mut()) {
            Ok(()) => Ok(true),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => Ok(false),
            Err(ffmpeg_next::Error::Eof) => Ok(false),
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }

    /**
        Reset the decoder after a seek.

        Clears internal buffers so frames from the old position are
        discarded before the decode loop resumes.
    */
    pub fn reset(&mut self) {
        self.decoder.flush();
    }
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixel_format", &self.pixel_format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    use vidarray_source::{Source, SourceConfig};

    fn write_y4m(name: &str, width: usize, height: usize, frames: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "vidarray-decode-{}-{}.y4m",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "YUV4MPEG2 W{width} H{height} F25:1 Ip A1:1\n").unwrap();
        for i in 0..frames {
            file.write_all(b"FRAME\n").unwrap();
            let y: Vec<u8> = (0..width * height).map(|p| (p + i) as u8).collect();
            file.write_all(&y).unwrap();
            let chroma = vec![128u8; (width / 2) * (height / 2)];
            file.write_all(&chroma).unwrap();
            file.write_all(&chroma).unwrap();
        }
        path
    }

    #[test]
    fn decoder_reports_stream_geometry() {
        let path = write_y4m("geometry", 64, 48, 1);
        let mut source = Source::open(&path, SourceConfig::default()).unwrap();
        let decoder = VideoDecoder::from_config(source.take_codec_config().unwrap()).unwrap();
        assert_eq!(decoder.width(), 64);
        assert_eq!(decoder.height(), 48);
        assert_eq!(decoder.pixel_format(), PixelFormat::Yuv420p);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn send_receive_produces_native_frames() {
        let path = write_y4m("roundtrip", 64, 48, 2);
        let mut source = Source::open(&path, SourceConfig::default()).unwrap();
        let mut decoder = VideoDecoder::from_config(source.take_codec_config().unwrap()).unwrap();

        let mut packet = vidarray_source::PacketBuf::empty();
        let mut frame = FrameBuf::empty();
        let mut frames = 0;

        while source.read_into(&mut packet).unwrap() {
            assert_eq!(decoder.send(&packet).unwrap(), SendResult::Accepted);
            while decoder.receive_into(&mut frame).unwrap() {
                assert_eq!(frame.width(), 64);
                assert_eq!(frame.height(), 48);
                assert_eq!(frame.pixel_format(), Some(PixelFormat::Yuv420p));
                frames += 1;
            }
        }
        decoder.send_eof().unwrap();
        while decoder.receive_into(&mut frame).unwrap() {
            frames += 1;
        }
        assert_eq!(frames, 2);
        fs::remove_file(&path).ok();
    }
}
