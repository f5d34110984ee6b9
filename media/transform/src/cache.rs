/*!
    Session-scoped cache of pixel conversion contexts.
*/

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use vidarray_types::{FrameFormat, PixelFormat, Result};

use crate::scaler::Scaler;

/**
    Maps output descriptors to lazily-created, reusable conversion contexts.

    Source dimensions and layout are fixed per decode session, so a
    [`FrameFormat`] key fully determines a context's behavior. Each distinct
    descriptor gets exactly one context for the cache's lifetime — there is no
    eviction, and the entry count is bounded by the number of distinct output
    formats requested (typically one).
*/
pub struct ScalerCache {
    src_width: u32,
    src_height: u32,
    src_format: PixelFormat,
    entries: HashMap<FrameFormat, Scaler>,
}

impl ScalerCache {
    /**
        Create an empty cache bound to the session's source geometry.
    */
    pub fn new(src_width: u32, src_height: u32, src_format: PixelFormat) -> Self {
        Self {
            src_width,
            src_height,
            src_format,
            entries: HashMap::new(),
        }
    }

    /**
        Look up the context for a descriptor, creating and caching it on the
        first request.

        Returns the identical context instance for equal descriptors; context
        construction failure is fatal for the descriptor and caches nothing.
    */
    pub fn get_or_create(&mut self, target: &FrameFormat) -> Result<&mut Scaler> {
        match self.entries.entry(*target) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                log::debug!(
                    "creating conversion context {}x{} {:?} -> {:?}",
                    self.src_width,
                    self.src_height,
                    self.src_format,
                    target
                );
                let scaler =
                    Scaler::new(self.src_width, self.src_height, self.src_format, target)?;
                Ok(entry.insert(scaler))
            }
        }
    }

    /**
        Number of distinct descriptors with a cached context.
    */
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /**
        Returns true if no context has been created yet.
    */
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /**
        Returns true if a context exists for the descriptor.
    */
    pub fn contains(&self, target: &FrameFormat) -> bool {
        self.entries.contains_key(target)
    }
}

impl std::fmt::Debug for ScalerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalerCache")
            .field(
                "src",
                &format_args!(
                    "{}x{} {:?}",
                    self.src_width, self.src_height, self.src_format
                ),
            )
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidarray_types::{FrameDtype, ScalingAlgorithm};

    fn cache() -> ScalerCache {
        ffmpeg_next::init().unwrap();
        ScalerCache::new(64, 48, PixelFormat::Yuv420p)
    }

    #[test]
    fn repeated_descriptor_reuses_the_same_context() {
        let mut cache = cache();
        let format = FrameFormat::new(64, 64, 1, FrameDtype::U8).unwrap();

        let first = cache.get_or_create(&format).unwrap() as *const Scaler;
        let second = cache.get_or_create(&format).unwrap() as *const Scaler;

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_descriptors_get_distinct_contexts() {
        let mut cache = cache();
        let gray = FrameFormat::new(64, 64, 1, FrameDtype::U8).unwrap();
        let rgb = FrameFormat::new(64, 64, 3, FrameDtype::U8).unwrap();
        let gray_lanczos = gray.with_algorithm(ScalingAlgorithm::Lanczos);

        let first = cache.get_or_create(&gray).unwrap() as *const Scaler;
        let second = cache.get_or_create(&rgb).unwrap() as *const Scaler;
        assert_ne!(first, second);

        cache.get_or_create(&gray_lanczos).unwrap();
        assert_eq!(cache.len(), 3);

        // Re-requesting any of them adds nothing.
        cache.get_or_create(&gray).unwrap();
        cache.get_or_create(&rgb).unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn cache_starts_empty() {
        let cache = cache();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn contains_reflects_creation() {
        let mut cache = cache();
        let format = FrameFormat::new(32, 32, 3, FrameDtype::U16).unwrap();
        assert!(!cache.contains(&format));
        cache.get_or_create(&format).unwrap();
        assert!(cache.contains(&format));
    }
}
