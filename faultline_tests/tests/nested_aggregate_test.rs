use std::sync::Arc;

use faultline::example::ExampleContext;
use faultline::failure::{AggregateFailure, FailureRecord};
use faultline::format::styler::NullStyler;
use faultline::render::render_failures;
use faultline_tests::{InMemorySource, framed, repo_ctx};

fn expectation(message: &str, frames: &[&str]) -> Arc<FailureRecord> {
    Arc::new(
        FailureRecord::new("Faultline::ExpectationNotMetError", message)
            .with_backtrace(frames.iter().copied()),
    )
}

fn nested_example() -> ExampleContext {
    let inner = AggregateFailure::new([expectation(
        "expected 4",
        &["/repo/tests/a.rs:4", "/repo/tests/a.rs:3", "/repo/tests/a.rs:1"],
    )]);
    let inner = FailureRecord::from_aggregate(
        inner,
        vec!["/repo/tests/a.rs:3".to_string(), "/repo/tests/a.rs:1".to_string()],
    );
    let outer = AggregateFailure::new([
        Arc::new(inner),
        expectation("expected 9", &["/repo/tests/a.rs:9", "/repo/tests/a.rs:1"]),
    ]);
    ExampleContext::failed(
        "nests aggregation blocks",
        FailureRecord::from_aggregate(outer, vec!["/repo/tests/a.rs:1".to_string()]),
    )
}

fn source() -> InMemorySource {
    InMemorySource::default()
        .with_line("/repo/tests/a.rs", 4, "    check(4);")
        .with_line("/repo/tests/a.rs", 9, "    check(9);")
}

#[test]
fn nested_aggregates_number_their_children_hierarchically() {
    let ctx = repo_ctx(source());
    let out = render_failures(&[nested_example()], &ctx, &NullStyler);
    similar_asserts::assert_eq!(
        out,
        [
            "",
            "  1) nests aggregation blocks",
            "     Got 2 failures:",
            "",
            "     1.1) Got 1 failure:",
            "",
            "          1.1.1) Failure/Error: check(4);",
            "                   expected 4",
            "                 # ./tests/a.rs:4",
            "",
            "     1.2) Failure/Error: check(9);",
            "            expected 9",
            "          # ./tests/a.rs:9",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn nested_report_snapshot() {
    let ctx = repo_ctx(source());
    let out = render_failures(&[nested_example()], &ctx, &NullStyler);
    insta::assert_snapshot!(framed(&out), @r"
    ---
      1) nests aggregation blocks
         Got 2 failures:

         1.1) Got 1 failure:

              1.1.1) Failure/Error: check(4);
                       expected 4
                     # ./tests/a.rs:4

         1.2) Failure/Error: check(9);
                expected 9
              # ./tests/a.rs:9
    ---
    ");
}

#[test]
fn aggregate_numbering_follows_the_example_position() {
    let ctx = repo_ctx(source());
    let plain = ExampleContext::failed(
        "plain failure",
        FailureRecord::new("Faultline::ExpectationNotMetError", "expected 9")
            .with_backtrace(["/repo/tests/a.rs:9"]),
    );
    let out = render_failures(&[plain.clone(), plain, nested_example()], &ctx, &NullStyler);
    assert!(out.contains("\n  3) nests aggregation blocks\n"));
    assert!(out.contains("\n     3.1) Got 1 failure:\n"));
    assert!(out.contains("\n          3.1.1) Failure/Error: check(4);\n"));
    assert!(out.contains("\n     3.2) Failure/Error: check(9);\n"));
}
