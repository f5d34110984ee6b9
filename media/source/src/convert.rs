/*!
    Conversion utilities between ffmpeg-next types and vidarray-types.
*/

use vidarray_types::{CodecId, Rational, StreamKind};

/**
    Convert ffmpeg_next::Rational to our Rational.
*/
pub fn rational_from_ffmpeg(r: ffmpeg_next::Rational) -> Rational {
    Rational::new(r.numerator(), r.denominator())
}

/**
    Convert ffmpeg_next codec ID to our CodecId.
*/
pub fn codec_id_from_ffmpeg(id: ffmpeg_next::codec::Id) -> Option<CodecId> {
    use ffmpeg_next::codec::Id;

    match id {
        // Video
        Id::H264 => Some(CodecId::H264),
        Id::HEVC => Some(CodecId::H265),
        Id::VP8 => Some(CodecId::Vp8),
        Id::VP9 => Some(CodecId::Vp9),
        Id::AV1 => Some(CodecId::Av1),
        Id::MPEG4 => Some(CodecId::Mpeg4),
        Id::MPEG2VIDEO => Some(CodecId::Mpeg2Video),
        Id::RAWVIDEO => Some(CodecId::RawVideo),
        // Audio
        Id::AAC => Some(CodecId::Aac),
        Id::OPUS => Some(CodecId::Opus),
        Id::MP3 => Some(CodecId::Mp3),
        Id::VORBIS => Some(CodecId::Vorbis),
        Id::FLAC => Some(CodecId::Flac),
        Id::AC3 => Some(CodecId::Ac3),
        Id::PCM_S16LE | Id::PCM_S16BE | Id::PCM_F32LE => Some(CodecId::Pcm),
        _ => None,
    }
}

/**
    Classify an ffmpeg media type as a StreamKind.
*/
pub fn stream_kind_from_ffmpeg(medium: ffmpeg_next::media::Type) -> StreamKind {
    use ffmpeg_next::media::Type;

    match medium {
        Type::Video => StreamKind::Video,
        Type::Audio => StreamKind::Audio,
        Type::Subtitle => StreamKind::Subtitle,
        Type::Data | Type::Attachment => StreamKind::Data,
        _ => StreamKind::Unknown,
    }
}
