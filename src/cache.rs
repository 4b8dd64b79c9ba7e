//! Storage-format versioning and the cached-render decision.
//!
//! Each stored table carries the format version its cached HTML was
//! rendered with. Bumping `CURRENT_FORMAT_VERSION` invalidates every cache
//! lazily: the next default-options display re-renders and re-persists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Version tag stored alongside a table and its cached HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageFormatVersion(pub u32);

/// Version written by this build.
pub const CURRENT_FORMAT_VERSION: StorageFormatVersion = StorageFormatVersion(3);

/// Oldest version whose stored table this build can still render.
pub const OLDEST_SUPPORTED_VERSION: StorageFormatVersion = StorageFormatVersion(1);

impl StorageFormatVersion {
    pub fn current() -> Self {
        CURRENT_FORMAT_VERSION
    }

    pub fn is_supported(self) -> bool {
        (OLDEST_SUPPORTED_VERSION..=CURRENT_FORMAT_VERSION).contains(&self)
    }
}

impl Default for StorageFormatVersion {
    fn default() -> Self {
        CURRENT_FORMAT_VERSION
    }
}

impl fmt::Display for StorageFormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached render is reused only when it was produced by the current
/// rules, the request uses default options, and debug mode is off.
pub fn should_reuse_cache(
    stored: StorageFormatVersion,
    current: StorageFormatVersion,
    options: &RenderOptions,
    debug_mode: bool,
) -> bool {
    stored == current && options.is_default() && !debug_mode
}

/// What a display request should do with the stored render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Serve the cached HTML as-is
    Reuse,
    /// Render with default options, then persist the HTML at the current version
    RenderAndPersist,
    /// Render for this request only; never written back
    RenderTransient,
    /// The stored table uses a format this build cannot render
    Unsupported(StorageFormatVersion),
}

impl CacheDecision {
    pub fn decide(
        stored: StorageFormatVersion,
        has_cache: bool,
        options: &RenderOptions,
        debug_mode: bool,
    ) -> Self {
        if !stored.is_supported() {
            return CacheDecision::Unsupported(stored);
        }
        if has_cache && should_reuse_cache(stored, CURRENT_FORMAT_VERSION, options, debug_mode) {
            return CacheDecision::Reuse;
        }
        if options.is_default() && !debug_mode {
            CacheDecision::RenderAndPersist
        } else {
            CacheDecision::RenderTransient
        }
    }
}
