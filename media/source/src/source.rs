/*!
    Media source implementation.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{ffi, format::context::Input as InputContext};

use vidarray_types::{Error, Rational, Result, StreamInfo};

use crate::codec_config::CodecConfig;
use crate::packet::PacketBuf;
use crate::probe::{build_stream_table, resolve_active_stream};

/**
    Selection of the active video stream.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamSelection {
    /// Use the container's best-stream heuristic.
    #[default]
    Auto,
    /// Use the stream at this container-native index.
    ///
    /// The index must refer to a video stream with a registered decoder,
    /// otherwise opening fails.
    Index(usize),
}

/**
    Configuration for opening a media source.
*/
#[derive(Clone, Debug, Default)]
pub struct SourceConfig {
    /// Which video stream to decode.
    pub stream: StreamSelection,
}

/**
    A media source that produces compressed packets.

    Created by [`open`] or [`Source::open`]. Owns the container handle,
    classifies every elementary stream at open time, and resolves exactly one
    active video stream whose packets downstream decoders consume.
*/
pub struct Source {
    /// The FFmpeg input context.
    input: InputContext,
    /// Index-aligned stream table, fixed at open time.
    streams: Vec<StreamInfo>,
    /// Index of the active video stream.
    active_stream: usize,
    /// Codec config for the active stream, consumed by the decoder.
    codec_config: Option<CodecConfig>,
    /// Average frame rate of the active stream, when known.
    frame_rate: Option<Rational>,
}

impl Source {
    /**
        Open a media file and resolve the active video stream.

        Every failure here aborts construction — a `Source` is never returned
        in a partially usable state.

        # Example

        ```ignore
        let source = Source::open("video.mp4", SourceConfig::default())?;
        println!("active stream: {}", source.active_stream_index());
        ```
    */
    pub fn open<P: AsRef<Path>>(path: P, config: SourceConfig) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let input = ffmpeg_next::format::input(&path).map_err(|e| {
            if e.to_string().contains("No such file") {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    e.to_string(),
                ))
            } else {
                Error::codec(e.to_string())
            }
        })?;

        let streams = build_stream_table(&input);
        let active_stream = resolve_active_stream(&input, &streams, config.stream)?;

        let parameters = input
            .stream(active_stream)
            .map(|s| s.parameters())
            .ok_or_else(|| {
                Error::stream_not_found(format!("stream {active_stream} vanished after selection"))
            })?;
        let codec_config = CodecConfig::new(parameters);
        let frame_rate = streams[active_stream]
            .video
            .as_ref()
            .and_then(|v| v.frame_rate);

        log::debug!(
            "opened container with {} stream(s), active video stream {}",
            streams.len(),
            active_stream
        );

        Ok(Self {
            input,
            streams,
            active_stream,
            codec_config: Some(codec_config),
            frame_rate,
        })
    }

    /**
        The stream table built at open time, index-aligned with the
        container's native stream ordering.
    */
    pub fn streams(&self) -> &[StreamInfo] {
        &self.streams
    }

    /**
        Index of the active video stream.
    */
    pub fn active_stream_index(&self) -> usize {
        self.active_stream
    }

    /**
        Average frame rate of the active stream, when the container knows it.
    */
    pub fn frame_rate(&self) -> Option<Rational> {
        self.frame_rate
    }

    /**
        Take the codec configuration of the active stream.

        Pass it to `vidarray-decode` to create the decoder. Returns `None`
        once taken.
    */
    pub fn take_codec_config(&mut self) -> Option<CodecConfig> {
        self.codec_config.take()
    }

    /**
        Refill the packet buffer with the next packet in file order.

        Returns `Ok(false)` at end of container — a normal terminal
        condition, not an error. The buffer's previous payload is released
        before the new one lands. Packets from any stream are returned;
        callers route by [`PacketBuf::stream_index`].
    */
    pub fn read_into(&mut self, packet: &mut PacketBuf) -> Result<bool> {
        loop {
            match packet.inner.read(&mut self.input) {
                Ok(()) => return Ok(true),
                Err(ffmpeg_next::Error::Eof) => return Ok(false),
                Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                    // Transient demux condition; keep reading.
                    continue;
                }
                Err(e) => return Err(Error::codec(e.to_string())),
            }
        }
    }

    /**
        Seek to a position in the media.

        Seeks to the nearest keyframe at or before the target position.
        After seeking, decoder buffers must be reset before resuming the
        decode loop.
    */
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let timestamp = (position.as_secs_f64() * ffi::AV_TIME_BASE as f64) as i64;

        self.input
            .seek(timestamp, ..timestamp)
            .map_err(|e| Error::codec(format!("seek failed: {e}")))?;

        Ok(())
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("streams", &self.streams.len())
            .field("active_stream", &self.active_stream)
            .finish_non_exhaustive()
    }
}

/**
    Open a media file with default configuration.

    Convenience function equivalent to `Source::open(path, SourceConfig::default())`.
*/
pub fn open<P: AsRef<Path>>(path: P) -> Result<Source> {
    Source::open(path, SourceConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    use vidarray_types::StreamKind;

    /// Write a tiny YUV4MPEG2 file: one raw video stream, `frames` frames.
    fn write_y4m(name: &str, width: usize, height: usize, frames: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "vidarray-source-{}-{}.y4m",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "YUV4MPEG2 W{width} H{height} F25:1 Ip A1:1\n").unwrap();
        for i in 0..frames {
            file.write_all(b"FRAME\n").unwrap();
            let y: Vec<u8> = (0..width * height)
                .map(|p| (p + i * 16) as u8)
                .collect();
            file.write_all(&y).unwrap();
            let chroma = vec![128u8; (width / 2) * (height / 2)];
            file.write_all(&chroma).unwrap();
            file.write_all(&chroma).unwrap();
        }
        path
    }

    /// Write a minimal PCM WAV file: one audio stream, no video.
    fn write_wav(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "vidarray-source-{}-{}.wav",
            name,
            std::process::id()
        ));
        let samples: Vec<u8> = vec![0u8; 800]; // 400 s16 mono samples
        let data_len = samples.len() as u32;
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"RIFF").unwrap();
        file.write_all(&(36 + data_len).to_le_bytes()).unwrap();
        file.write_all(b"WAVE").unwrap();
        file.write_all(b"fmt ").unwrap();
        file.write_all(&16u32.to_le_bytes()).unwrap();
        file.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
        file.write_all(&1u16.to_le_bytes()).unwrap(); // mono
        file.write_all(&8000u32.to_le_bytes()).unwrap();
        file.write_all(&16000u32.to_le_bytes()).unwrap();
        file.write_all(&2u16.to_le_bytes()).unwrap();
        file.write_all(&16u16.to_le_bytes()).unwrap();
        file.write_all(b"data").unwrap();
        file.write_all(&data_len.to_le_bytes()).unwrap();
        file.write_all(&samples).unwrap();
        path
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let result = open("/nonexistent/path/to/video.mp4");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn auto_selection_finds_the_video_stream() {
        let path = write_y4m("auto", 64, 48, 2);
        let source = open(&path).unwrap();
        assert_eq!(source.active_stream_index(), 0);

        let streams = source.streams();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].kind, StreamKind::Video);
        assert!(streams[0].decodable);
        let video = streams[0].video.as_ref().unwrap();
        assert_eq!(video.width, 64);
        assert_eq!(video.height, 48);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn explicit_index_out_of_range_fails() {
        let path = write_y4m("oob", 64, 48, 1);
        let result = Source::open(
            &path,
            SourceConfig {
                stream: StreamSelection::Index(7),
            },
        );
        assert!(matches!(result, Err(Error::StreamNotFound { .. })));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn explicit_valid_index_succeeds() {
        let path = write_y4m("valid", 64, 48, 1);
        let source = Source::open(
            &path,
            SourceConfig {
                stream: StreamSelection::Index(0),
            },
        )
        .unwrap();
        assert_eq!(source.active_stream_index(), 0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn audio_only_container_has_no_video_stream() {
        let path = write_wav("audio-auto");
        let result = open(&path);
        assert!(matches!(result, Err(Error::StreamNotFound { .. })));

        // An explicit index pointing at the audio stream must fail too.
        let result = Source::open(
            &path,
            SourceConfig {
                stream: StreamSelection::Index(0),
            },
        );
        assert!(matches!(result, Err(Error::StreamNotFound { .. })));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn reads_one_packet_per_frame_then_eof() {
        let path = write_y4m("packets", 64, 48, 3);
        let mut source = open(&path).unwrap();
        let mut packet = PacketBuf::empty();

        let mut count = 0;
        while source.read_into(&mut packet).unwrap() {
            assert_eq!(packet.stream_index(), 0);
            assert!(!packet.is_empty());
            count += 1;
        }
        assert_eq!(count, 3);

        // End of container is idempotent.
        assert!(!source.read_into(&mut packet).unwrap());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn probe_reports_video_details() {
        let path = write_y4m("probe", 64, 48, 2);
        let streams = crate::probe(&path).unwrap();
        assert_eq!(streams.len(), 1);
        assert!(streams[0].kind.is_video());
        assert!(streams[0].codec.is_some());
        assert_eq!(streams[0].codec_id, Some(vidarray_types::CodecId::RawVideo));
        let video = streams[0].video.as_ref().unwrap();
        assert_eq!((video.width, video.height), (64, 48));
        assert_eq!(video.frame_rate.map(|r| r.to_f64()), Some(25.0));
        fs::remove_file(&path).ok();
    }
}
