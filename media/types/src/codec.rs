/*!
    Codec identifiers.
*/

/**
    Codecs recognized by the ecosystem.

    A subset of what FFmpeg can decode; streams using anything else still
    decode fine, they just report no `CodecId` in diagnostics.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    // Video
    H264,
    H265,
    Vp8,
    Vp9,
    Av1,
    Mpeg4,
    Mpeg2Video,
    RawVideo,
    // Audio
    Aac,
    Opus,
    Mp3,
    Vorbis,
    Flac,
    Ac3,
    Pcm,
}

impl CodecId {
    /**
        Returns true if this is a video codec.
    */
    pub const fn is_video(self) -> bool {
        matches!(
            self,
            Self::H264
                | Self::H265
                | Self::Vp8
                | Self::Vp9
                | Self::Av1
                | Self::Mpeg4
                | Self::Mpeg2Video
                | Self::RawVideo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_codecs_are_classified() {
        assert!(CodecId::H264.is_video());
        assert!(CodecId::RawVideo.is_video());
        assert!(!CodecId::Aac.is_video());
        assert!(!CodecId::Pcm.is_video());
    }
}
