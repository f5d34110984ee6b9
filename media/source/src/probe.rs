/*!
    Stream enumeration and diagnostics.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use vidarray_types::{Error, Result, StreamInfo, VideoDetails};

use crate::convert::{codec_id_from_ffmpeg, rational_from_ffmpeg, stream_kind_from_ffmpeg};

/**
    Enumerate the elementary streams of a media file.

    Reports, per stream, its classified media type, whether a decoder is
    registered for its codec, and — for video streams — resolution, average
    frame rate, start time, duration, and bit rate. Pure read-only reporting;
    no decoder state is created.

    # Example

    ```ignore
    for stream in probe("video.mp4")? {
        println!("[{}] {:?}", stream.index, stream.kind);
    }
    ```
*/
pub fn probe<P: AsRef<Path>>(path: P) -> Result<Vec<StreamInfo>> {
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

    Ok(build_stream_table(&input))
}

/**
    Build the index-aligned stream table from an opened input context.
*/
pub(crate) fn build_stream_table(input: &InputContext) -> Vec<StreamInfo> {
    input
        .streams()
        .map(|stream| {
            let parameters = stream.parameters();
            let kind = stream_kind_from_ffmpeg(parameters.medium());
            let decoder = ffmpeg_next::decoder::find(parameters.id());

            let video = kind
                .is_video()
                .then(|| extract_video_details(&stream));

            StreamInfo {
                index: stream.index(),
                kind,
                decodable: decoder.is_some(),
                codec: decoder.map(|c| c.name().to_string()),
                codec_id: codec_id_from_ffmpeg(parameters.id()),
                video,
            }
        })
        .collect()
}

/**
    Extract video diagnostics from one stream.
*/
fn extract_video_details(stream: &ffmpeg_next::Stream<'_>) -> VideoDetails {
    let time_base = rational_from_ffmpeg(stream.time_base()).to_f64();

    // avg_frame_rate is unset for some containers; fall back to the raw rate.
    let valid = |r: ffmpeg_next::Rational| r.numerator() != 0 && r.denominator() != 0;
    let frame_rate = if valid(stream.avg_frame_rate()) {
        Some(rational_from_ffmpeg(stream.avg_frame_rate()))
    } else if valid(stream.rate()) {
        Some(rational_from_ffmpeg(stream.rate()))
    } else {
        None
    };

    let start_time = (stream.start_time() >= 0)
        .then(|| Duration::from_secs_f64(stream.start_time() as f64 * time_base));
    let duration = (stream.duration() > 0)
        .then(|| Duration::from_secs_f64(stream.duration() as f64 * time_base));

    let parameters = stream.parameters();
    // SAFETY: reading from a valid AVCodecParameters pointer owned by the stream
    let (width, height, bit_rate) = unsafe {
        let ptr = parameters.as_ptr();
        let bit_rate = if (*ptr).bit_rate > 0 {
            Some((*ptr).bit_rate as u64)
        } else {
            None
        };
        ((*ptr).width.max(0) as u32, (*ptr).height.max(0) as u32, bit_rate)
    };

    VideoDetails {
        width,
        height,
        frame_rate,
        start_time,
        duration,
        bit_rate,
    }
}

/**
    Resolve the active video stream for a session.

    `Auto` delegates to the container's best-stream heuristic; an explicit
    index must refer to a video stream with a registered decoder.
*/
pub(crate) fn resolve_active_stream(
    input: &InputContext,
    table: &[StreamInfo],
    selection: crate::StreamSelection,
) -> Result<usize> {
    match selection {
        crate::StreamSelection::Auto => {
            let stream = input
                .streams()
                .best(Type::Video)
                .ok_or_else(|| Error::stream_not_found("container has no video stream"))?;
            let index = stream.index();
            if !table[index].decodable {
                return Err(Error::stream_not_found(format!(
                    "video stream {index} has no registered decoder"
                )));
            }
            Ok(index)
        }
        crate::StreamSelection::Index(index) => {
            let info = table.get(index).ok_or_else(|| {
                Error::stream_not_found(format!(
                    "stream index {index} is out of range ({} streams in container)",
                    table.len()
                ))
            })?;
            if !info.kind.is_video() {
                return Err(Error::stream_not_found(format!(
                    "stream {index} is {:?}, not video",
                    info.kind
                )));
            }
            if !info.decodable {
                return Err(Error::stream_not_found(format!(
                    "video stream {index} has no registered decoder"
                )));
            }
            Ok(index)
        }
    }
}
