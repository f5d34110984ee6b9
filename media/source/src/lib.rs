/*!
    Container demuxing and stream selection for the vidarray crate ecosystem.

    This crate handles the input side of the decode pipeline. It opens media
    containers, classifies their elementary streams, selects the active video
    stream, and refills a reusable packet buffer that downstream crates decode.
*/

pub use vidarray_types::{CodecId, Error, Result, StreamInfo, StreamKind};

mod codec_config;
mod convert;
mod packet;
mod probe;
mod source;

pub use codec_config::CodecConfig;
pub use packet::PacketBuf;
pub use probe::probe;
pub use source::{Source, SourceConfig, StreamSelection, open};
