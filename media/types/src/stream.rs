/*!
    Stream classification and diagnostics types.
*/

use std::time::Duration;

use crate::{CodecId, Rational};

/**
    Type of media stream.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreamKind {
    /// Video stream
    Video,
    /// Audio stream
    Audio,
    /// Subtitle stream
    Subtitle,
    /// Data stream (timecodes, metadata, etc.)
    Data,
    /// Anything the container could not classify
    Unknown,
}

impl StreamKind {
    /**
        Returns true if this is a video stream.
    */
    pub const fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }
}

/**
    Diagnostic description of one elementary stream.

    Entries are index-aligned with the container's native stream ordering and
    fixed once the container is opened. Purely informational — holding one has
    no effect on decoding.
*/
#[derive(Clone, Debug)]
pub struct StreamInfo {
    /// Native stream index within the container.
    pub index: usize,
    /// Classified media type.
    pub kind: StreamKind,
    /// Whether a registered decoder exists for this stream's codec.
    pub decodable: bool,
    /// Decoder name for the stream's codec, when one is registered.
    pub codec: Option<String>,
    /// Recognized codec identifier, when the codec is one we classify.
    pub codec_id: Option<CodecId>,
    /// Video-specific details (None for non-video streams).
    pub video: Option<VideoDetails>,
}

/**
    Video-specific stream details for diagnostics.
*/
#[derive(Clone, Debug)]
pub struct VideoDetails {
    /// Coded frame width in pixels.
    pub width: u32,
    /// Coded frame height in pixels.
    pub height: u32,
    /// Average frame rate (may be unavailable).
    pub frame_rate: Option<Rational>,
    /// Stream start time (may be unavailable).
    pub start_time: Option<Duration>,
    /// Stream duration (may be unavailable).
    pub duration: Option<Duration>,
    /// Bitrate in bits per second (if known).
    pub bit_rate: Option<u64>,
}

impl VideoDetails {
    /**
        Returns the frame rate as fps, if available.
    */
    pub fn fps(&self) -> Option<f64> {
        self.frame_rate.map(|r| r.to_f64())
    }
}

static_assertions::assert_impl_all!(StreamInfo: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_is_video() {
        assert!(StreamKind::Video.is_video());
        assert!(!StreamKind::Audio.is_video());
        assert!(!StreamKind::Subtitle.is_video());
    }

    #[test]
    fn video_details_fps() {
        let details = VideoDetails {
            width: 1920,
            height: 1080,
            frame_rate: Some(Rational::new(30, 1)),
            start_time: None,
            duration: Some(Duration::from_secs(120)),
            bit_rate: None,
        };
        assert_eq!(details.fps(), Some(30.0));

        let no_rate = VideoDetails {
            frame_rate: None,
            ..details
        };
        assert_eq!(no_rate.fps(), None);
    }
}
