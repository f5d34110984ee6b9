/*!
    The decode session: packet loop, frame conversion, array output.
*/

use std::path::Path;
use std::time::Duration;

use ndarray::{Array3, ArrayViewMut3};

use vidarray_decode::{FrameBuf, SendResult, VideoDecoder};
use vidarray_source::{PacketBuf, Source, SourceConfig, StreamSelection};
use vidarray_transform::ScalerCache;
use vidarray_types::{
    Error, FrameDtype, FrameFormat, PixelFormat, Rational, Result, ScalingAlgorithm, StreamInfo,
};

use crate::array::{FrameArray, FrameSample, cast_u16_to_f16};

/**
    Options for opening a video reader.
*/
#[derive(Clone, Debug, Default)]
pub struct ReaderOptions {
    /// Which video stream to decode.
    pub stream: StreamSelection,
}

/// Input the decode loop still owes the decoder.
#[derive(Clone, Copy)]
enum Pending {
    None,
    /// The packet buffer holds a packet the decoder refused with "full".
    Packet,
    /// End of container was reached but the EOF signal was refused.
    Eof,
}

/**
    A video decode session producing frames as numeric arrays.

    Owns the container handle, the decoder, one reusable packet buffer, one
    reusable frame buffer, and the conversion context cache. Frames are
    produced strictly forward, in decode order; when the container is
    exhausted the reader drains the decoder's buffered frames and then
    reports end of stream on every subsequent call.

    One reader is one session: it must not be shared across threads. For
    parallel decode, open an independent reader per thread.
*/
pub struct VideoReader {
    source: Source,
    decoder: VideoDecoder,
    packet: PacketBuf,
    frame: FrameBuf,
    scalers: ScalerCache,
    active_stream: usize,
    pending: Pending,
    /// End of container reached; decoder is flushing buffered frames.
    draining: bool,
    /// Terminal state: every further read reports no frame.
    finished: bool,
    /// Staging buffer for the f16 cast step.
    scratch: Vec<u16>,
}

impl VideoReader {
    /**
        Open a media file with automatic video stream selection.
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, ReaderOptions::default())
    }

    /**
        Open a media file with the given options.

        Fails when the container cannot be opened, no decodable video stream
        matches the selection, or the decoder cannot be created — never
        returning a partially usable session.
    */
    pub fn open_with<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let mut source = Source::open(
            path,
            SourceConfig {
                stream: options.stream,
            },
        )?;
        let codec_config = source
            .take_codec_config()
            .expect("a fresh source carries the active stream's codec config");
        let decoder = VideoDecoder::from_config(codec_config)?;
        let scalers = ScalerCache::new(decoder.width(), decoder.height(), decoder.pixel_format());

        Ok(Self {
            active_stream: source.active_stream_index(),
            source,
            decoder,
            packet: PacketBuf::empty(),
            frame: FrameBuf::empty(),
            scalers,
            pending: Pending::None,
            draining: false,
            finished: false,
            scratch: Vec::new(),
        })
    }

    /**
        Native decode width in pixels.
    */
    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    /**
        Native decode height in pixels.
    */
    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    /**
        Native pixel layout the decoder produces.
    */
    pub fn pixel_format(&self) -> PixelFormat {
        self.decoder.pixel_format()
    }

    /**
        Average frame rate of the active stream, when the container knows it.
    */
    pub fn frame_rate(&self) -> Option<Rational> {
        self.source.frame_rate()
    }

    /**
        Diagnostic view of every elementary stream in the container.
    */
    pub fn streams(&self) -> &[StreamInfo] {
        self.source.streams()
    }

    /**
        Index of the active video stream.
    */
    pub fn active_stream_index(&self) -> usize {
        self.active_stream
    }

    /**
        Number of distinct conversion contexts created so far.
    */
    pub fn cached_conversions(&self) -> usize {
        self.scalers.len()
    }

    /**
        Read the next frame at the native decode resolution.

        Equivalent to [`next_frame_as`](Self::next_frame_as) with a
        3-channel `U8` descriptor matching the decoder-reported dimensions.
        Returns `Ok(None)` at end of stream, idempotently.
    */
    pub fn next_frame(&mut self) -> Result<Option<Array3<u8>>> {
        let format = FrameFormat::native(self.decoder.width(), self.decoder.height())?;
        self.next_frame_alloc::<u8>(&format)
    }

    /**
        Read the next frame converted into the given output format.

        Allocates a fresh array shaped `height × width × channels` with the
        descriptor's dtype. Returns `Ok(None)` at end of stream, idempotently.
    */
    pub fn next_frame_as(&mut self, format: &FrameFormat) -> Result<Option<FrameArray>> {
        match format.dtype() {
            FrameDtype::U8 => Ok(self.next_frame_alloc::<u8>(format)?.map(FrameArray::U8)),
            FrameDtype::U16 => Ok(self.next_frame_alloc::<u16>(format)?.map(FrameArray::U16)),
            FrameDtype::F16 => Ok(self
                .next_frame_alloc::<half::f16>(format)?
                .map(FrameArray::F16)),
        }
    }

    /**
        Read the next frame into a caller-supplied array.

        The output descriptor is resolved from the array's shape and element
        type; the array must be contiguous in standard layout. Returns
        `Ok(false)` at end of stream, leaving the array untouched.
    */
    pub fn next_frame_into<T: FrameSample>(
        &mut self,
        mut out: ArrayViewMut3<'_, T>,
        algorithm: ScalingAlgorithm,
    ) -> Result<bool> {
        let (height, width, channels) = out.dim();
        let format = FrameFormat::new(height as u32, width as u32, channels as u32, T::DTYPE)?
            .with_algorithm(algorithm);
        let slice = out.as_slice_mut().ok_or_else(|| {
            Error::invalid_data("output array must be contiguous in standard layout")
        })?;
        self.read_into_format(&format, slice)
    }

    /**
        Seek to a position in the media.

        Seeks the container to the nearest keyframe at or before the target,
        resets the decoder, and clears end-of-stream state so the decode loop
        resumes cleanly from the new position.
    */
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.source.seek(position)?;
        self.decoder.reset();
        self.pending = Pending::None;
        self.draining = false;
        self.finished = false;
        Ok(())
    }

    /// Allocate an output array for `format` and fill it from the next frame.
    fn next_frame_alloc<T: FrameSample>(
        &mut self,
        format: &FrameFormat,
    ) -> Result<Option<Array3<T>>> {
        let dim = (
            format.height() as usize,
            format.width() as usize,
            format.channels() as usize,
        );
        let mut array = Array3::from_elem(dim, T::default());
        let filled = {
            let slice = array
                .as_slice_mut()
                .expect("freshly allocated arrays are contiguous");
            self.read_into_format(format, slice)?
        };
        Ok(filled.then_some(array))
    }

    /// Advance to the next completed frame and convert it into `out`.
    fn read_into_format<T: FrameSample>(
        &mut self,
        format: &FrameFormat,
        out: &mut [T],
    ) -> Result<bool> {
        debug_assert_eq!(T::DTYPE, format.dtype());
        if out.len() != format.sample_len() {
            return Err(Error::invalid_data(format!(
                "output has {} samples but the format needs {}",
                out.len(),
                format.sample_len()
            )));
        }
        if !self.advance_frame()? {
            return Ok(false);
        }
        self.convert_current(format, out)?;
        Ok(true)
    }

    /**
        Drive the packet/decode cycle until a frame lands in the reusable
        frame buffer or the stream ends.

        Packets from non-active streams are discarded. A decode error on an
        individual packet is absorbed — the packet is dropped and the loop
        continues, relying on the decoder's own resilience. After the last
        container packet, the decoder is flushed so buffered frames drain
        before the terminal end-of-stream state.
    */
    fn advance_frame(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        loop {
            // Frames the decoder already completed come out before new input.
            if self.decoder.receive_into(&mut self.frame)? {
                return Ok(true);
            }
            if self.draining {
                self.finished = true;
                log::debug!("end of stream on stream {}", self.active_stream);
                return Ok(false);
            }

            match self.pending {
                Pending::Packet => {
                    match self.decoder.send(&self.packet)? {
                        SendResult::Accepted => self.pending = Pending::None,
                        SendResult::Full => {
                            return Err(Error::codec(
                                "decoder refused input while producing no frames",
                            ));
                        }
                    }
                    continue;
                }
                Pending::Eof => {
                    match self.decoder.send_eof()? {
                        SendResult::Accepted => {
                            self.pending = Pending::None;
                            self.draining = true;
                        }
                        SendResult::Full => {
                            return Err(Error::codec(
                                "decoder refused flush while producing no frames",
                            ));
                        }
                    }
                    continue;
                }
                Pending::None => {}
            }

            if !self.source.read_into(&mut self.packet)? {
                match self.decoder.send_eof()? {
                    SendResult::Accepted => self.draining = true,
                    SendResult::Full => self.pending = Pending::Eof,
                }
                continue;
            }

            if self.packet.stream_index() != self.active_stream {
                log::trace!(
                    "skipping packet from inactive stream {}",
                    self.packet.stream_index()
                );
                continue;
            }

            match self.decoder.send(&self.packet) {
                Ok(SendResult::Accepted) => {}
                Ok(SendResult::Full) => self.pending = Pending::Packet,
                Err(e) => log::debug!("dropping undecodable packet: {e}"),
            }
        }
    }

    /// Convert the frame buffer's contents into `out` via the cached context.
    fn convert_current<T: FrameSample>(&mut self, format: &FrameFormat, out: &mut [T]) -> Result<()> {
        match format.dtype() {
            FrameDtype::U8 | FrameDtype::U16 => {
                let scaler = self.scalers.get_or_create(format)?;
                scaler.run(&self.frame, bytemuck::cast_slice_mut(out))
            }
            FrameDtype::F16 => {
                // No native float layout: convert through u16, then apply
                // the documented cast step (linear rescale to [0, 1]).
                self.scratch.resize(format.sample_len(), 0);
                let scaler = self.scalers.get_or_create(format)?;
                scaler.run(&self.frame, bytemuck::cast_slice_mut(&mut self.scratch))?;
                cast_u16_to_f16(&self.scratch, bytemuck::cast_slice_mut(out));
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for VideoReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoReader")
            .field("active_stream", &self.active_stream)
            .field(
                "native",
                &format_args!("{}x{} {:?}", self.width(), self.height(), self.pixel_format()),
            )
            .field("cached_conversions", &self.cached_conversions())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
