use crate::cache::{
    CURRENT_FORMAT_VERSION, CacheDecision, OLDEST_SUPPORTED_VERSION, StorageFormatVersion,
    should_reuse_cache,
};
use crate::render::RenderOptions;

fn v(n: u32) -> StorageFormatVersion {
    StorageFormatVersion(n)
}

#[test]
fn reuse_requires_matching_version() {
    let defaults = RenderOptions::default();
    assert!(should_reuse_cache(v(3), v(3), &defaults, false));
    assert!(!should_reuse_cache(v(2), v(3), &defaults, false));
    assert!(!should_reuse_cache(v(4), v(3), &defaults, false));
}

#[test]
fn reuse_requires_default_options() {
    let custom = RenderOptions::default().with_row_numbers(false);
    assert!(!should_reuse_cache(v(3), v(3), &custom, false));

    let rows = RenderOptions::default().with_included_rows(vec![1]);
    assert!(!should_reuse_cache(v(3), v(3), &rows, false));
}

#[test]
fn debug_mode_never_reuses() {
    assert!(!should_reuse_cache(v(3), v(3), &RenderOptions::default(), true));
}

#[test]
fn current_version_is_supported_and_default() {
    assert_eq!(StorageFormatVersion::default(), CURRENT_FORMAT_VERSION);
    assert_eq!(StorageFormatVersion::current(), CURRENT_FORMAT_VERSION);
    assert!(CURRENT_FORMAT_VERSION.is_supported());
    assert!(OLDEST_SUPPORTED_VERSION.is_supported());
    assert!(!v(0).is_supported());
    assert!(!v(CURRENT_FORMAT_VERSION.0 + 1).is_supported());
}

#[test]
fn fresh_cache_is_reused() {
    let decision = CacheDecision::decide(CURRENT_FORMAT_VERSION, true, &RenderOptions::default(), false);
    assert_eq!(decision, CacheDecision::Reuse);
}

#[test]
fn stale_or_missing_cache_is_rendered_and_persisted() {
    let defaults = RenderOptions::default();
    assert_eq!(
        CacheDecision::decide(OLDEST_SUPPORTED_VERSION, true, &defaults, false),
        CacheDecision::RenderAndPersist
    );
    assert_eq!(
        CacheDecision::decide(CURRENT_FORMAT_VERSION, false, &defaults, false),
        CacheDecision::RenderAndPersist
    );
}

#[test]
fn custom_options_or_debug_render_transiently() {
    let custom = RenderOptions::default().with_page_length(50);
    assert_eq!(
        CacheDecision::decide(CURRENT_FORMAT_VERSION, true, &custom, false),
        CacheDecision::RenderTransient
    );
    assert_eq!(
        CacheDecision::decide(CURRENT_FORMAT_VERSION, true, &RenderOptions::default(), true),
        CacheDecision::RenderTransient
    );
}

#[test]
fn unknown_version_is_unsupported() {
    let future = v(CURRENT_FORMAT_VERSION.0 + 1);
    assert_eq!(
        CacheDecision::decide(future, true, &RenderOptions::default(), false),
        CacheDecision::Unsupported(future)
    );
}

#[test]
fn version_serializes_as_a_number() {
    assert_eq!(serde_json::to_string(&v(3)).expect("serialize"), "3");
    assert_eq!(v(2).to_string(), "2");
}
