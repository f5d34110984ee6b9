/*!
    Decoded video frames as dense numeric arrays.

    This crate is the application-facing surface of the vidarray ecosystem.
    A [`VideoReader`] owns one decode session — container handle, decoder,
    reusable packet and frame buffers, and a cache of pixel conversion
    contexts — and produces frames as `ndarray` arrays shaped
    `height × width × channels`.

    # Example

    ```ignore
    use vidarray::VideoReader;

    let mut reader = VideoReader::open("video.mp4")?;
    while let Some(frame) = reader.next_frame()? {
        // frame: Array3<u8> at the native decode resolution
        process(frame);
    }
    ```

    Resized or retyped output goes through a [`FrameFormat`] descriptor:

    ```ignore
    use vidarray::{FrameDtype, FrameFormat, VideoReader};

    let mut reader = VideoReader::open("video.mp4")?;
    let format = FrameFormat::new(224, 224, 3, FrameDtype::F16)?;
    while let Some(frame) = reader.next_frame_as(&format)? {
        // frame: FrameArray::F16, samples rescaled to [0.0, 1.0]
    }
    ```

    Sessions are single-threaded by design. For parallel decode, open one
    independent `VideoReader` per thread — native decode and conversion state
    is never shared.
*/

pub use vidarray_source::{SourceConfig, StreamSelection, probe};
pub use vidarray_types::{
    CodecId, Error, FrameDtype, FrameFormat, PixelFormat, Rational, Result, ScalingAlgorithm,
    StreamInfo, StreamKind, VideoDetails,
};

mod array;
mod reader;

pub use array::{FrameArray, FrameSample};
pub use reader::{ReaderOptions, VideoReader};
