/*!
    Pixel conversion for the vidarray crate ecosystem.

    This crate turns decoded frames in their native layout into the packed
    layouts the [`FrameFormat`] descriptor requests, resizing along the way.
    Conversion contexts are expensive to build, so the [`ScalerCache`] keeps
    exactly one per distinct descriptor for the lifetime of a session.

    [`FrameFormat`]: vidarray_types::FrameFormat
*/

pub use vidarray_types::{Error, FrameFormat, Result};

mod cache;
mod scaler;

pub use cache::ScalerCache;
pub use scaler::Scaler;
