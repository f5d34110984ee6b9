/*!
    Video decoding for the vidarray crate ecosystem.

    This crate transforms compressed packets into raw frames through an
    explicit two-phase state machine: packets are submitted with
    [`VideoDecoder::send`], completed frames are pulled into a reusable
    [`FrameBuf`] with [`VideoDecoder::receive_into`]. A single packet may
    yield zero, one, or multiple frames depending on codec buffering.

    # Example

    ```ignore
    use vidarray_source::{PacketBuf, open};
    use vidarray_decode::{FrameBuf, SendResult, VideoDecoder};

    let mut source = open("video.mp4")?;
    let config = source.take_codec_config().unwrap();
    let mut decoder = VideoDecoder::from_config(config)?;

    let mut packet = PacketBuf::empty();
    let mut frame = FrameBuf::empty();
    while source.read_into(&mut packet)? {
        if packet.stream_index() != source.active_stream_index() {
            continue;
        }
        decoder.send(&packet)?;
        while decoder.receive_into(&mut frame)? {
            // Convert / consume the frame before the next receive.
        }
    }
    ```
*/

pub use vidarray_source::CodecConfig;
pub use vidarray_types::{Error, Result};

mod convert;
mod frame;
mod video;

pub use frame::FrameBuf;
pub use video::{SendResult, VideoDecoder};
