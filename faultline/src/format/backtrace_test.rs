use crate::example::ExampleMetadata;
use crate::format::backtrace::{BacktraceFormatter, EmptyBacktraceFormatter, FilteringBacktraceFormatter};
use crate::config::DEFAULT_BACKTRACE_EXCLUSION_PATTERNS;

fn frames(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_exclusions() -> Vec<String> {
    DEFAULT_BACKTRACE_EXCLUSION_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn filtering_formatter_hides_library_frames_and_relativizes_project_ones() {
    let formatter =
        FilteringBacktraceFormatter::new(&default_exclusions(), &[], false, "/repo").unwrap();
    let backtrace = frames(&[
        "/repo/src/widget.rs:12:5",
        "/home/me/.cargo/registry/src/dep/lib.rs:3",
        "/rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/core/src/ops/function.rs:250:5",
        "/repo/tests/widget_test.rs:4",
    ]);
    assert_eq!(
        formatter.format_backtrace(&backtrace, &ExampleMetadata::default()),
        frames(&["./src/widget.rs:12:5", "./tests/widget_test.rs:4"])
    );
}

#[test]
fn relative_frames_are_shown_under_the_project_root() {
    let formatter = FilteringBacktraceFormatter::new(&[], &[], false, "/repo").unwrap();
    let backtrace = frames(&[
        "src/widget.rs:12:5",
        "./tests/widget_test.rs:4",
        "<internal:kernel>:90",
        "/usr/lib/thing.rs:1",
    ]);
    assert_eq!(
        formatter.format_backtrace(&backtrace, &ExampleMetadata::default()),
        frames(&[
            "./src/widget.rs:12:5",
            "./tests/widget_test.rs:4",
            "<internal:kernel>:90",
            "/usr/lib/thing.rs:1",
        ])
    );
}

#[test]
fn inclusion_patterns_win_over_exclusions() {
    let formatter = FilteringBacktraceFormatter::new(
        &default_exclusions(),
        &[r"/registry/src/dep/".to_string()],
        false,
        "/repo",
    )
    .unwrap();
    let backtrace = frames(&["/home/me/.cargo/registry/src/dep/lib.rs:3"]);
    assert!(!formatter.is_excluded(&backtrace[0]));
}

#[test]
fn filtering_never_hides_the_whole_trace() {
    let formatter =
        FilteringBacktraceFormatter::new(&default_exclusions(), &[], false, "/repo").unwrap();
    let backtrace = frames(&["/home/me/.cargo/registry/src/dep/lib.rs:3"]);
    assert_eq!(
        formatter.format_backtrace(&backtrace, &ExampleMetadata::default()),
        backtrace
    );
}

#[test]
fn full_backtrace_metadata_disables_filtering() {
    let formatter =
        FilteringBacktraceFormatter::new(&default_exclusions(), &[], false, "/repo").unwrap();
    let backtrace = frames(&["/repo/src/a.rs:1", "/home/me/.cargo/registry/src/dep/lib.rs:3"]);
    let metadata = ExampleMetadata {
        full_backtrace: Some(true),
        ..ExampleMetadata::default()
    };
    assert_eq!(formatter.format_backtrace(&backtrace, &metadata).len(), 2);
}

#[test]
fn invalid_patterns_are_reported() {
    let err = FilteringBacktraceFormatter::new(&["(".to_string()], &[], false, "/repo").unwrap_err();
    assert!(err.to_string().contains("backtraceExclusionPatterns"));
}

#[test]
fn empty_formatter_yields_nothing() {
    let backtrace = frames(&["/repo/src/a.rs:1"]);
    assert!(
        EmptyBacktraceFormatter
            .format_backtrace(&backtrace, &ExampleMetadata::default())
            .is_empty()
    );
}
