/*!
    Shared types for the vidarray crate ecosystem.

    This crate defines the vocabulary of the ecosystem — the types that cross crate
    boundaries. It has no dependency on FFmpeg, making it lightweight and enabling
    consumers to depend on it without pulling in FFmpeg bindings.
*/

mod codec;
mod descriptor;
mod error;
mod format;
mod rational;
mod stream;

pub use codec::CodecId;
pub use descriptor::FrameFormat;
pub use error::{Error, Result};
pub use format::{FrameDtype, PixelFormat, ScalingAlgorithm};
pub use rational::Rational;
pub use stream::{StreamInfo, StreamKind, VideoDetails};
