use std::sync::Arc;

use crate::example::{ExampleContext, ExecutionStatus};
use crate::failure::{AggregateFailure, FailureKind, FailureRecord};
use crate::format::factory::{build_options, build_presenter, kind_options};
use crate::format::options::{DescriptionFormatter, DetailFormatter, ReportKind};
use crate::format::styler::{NullStyler, Style};
use crate::format::test_support::{MapLocator, repo_ctx};

fn math_locator() -> MapLocator {
    MapLocator::default()
        .with_line("/repo/spec/math_spec.rs", 5, "    expect(1).to eq(2)")
        .with_line("/repo/spec/math_spec.rs", 6, "    raise \"boom\"")
}

fn math_aggregate(hide_backtrace: bool) -> FailureRecord {
    let expectation = FailureRecord::new("Faultline::ExpectationNotMetError", "expected 1, got 2")
        .with_backtrace([
            "/repo/spec/math_spec.rs:5",
            "/repo/spec/math_spec.rs:3",
            "/repo/src/runner.rs:40",
        ]);
    let error = FailureRecord::new("RuntimeError", "boom")
        .with_kind(FailureKind::Runtime)
        .with_backtrace([
            "/repo/spec/math_spec.rs:6",
            "/repo/spec/math_spec.rs:3",
            "/repo/src/runner.rs:40",
        ]);
    let aggregate = AggregateFailure::new([Arc::new(expectation), Arc::new(error)])
        .with_hide_backtrace(hide_backtrace);
    FailureRecord::from_aggregate(
        aggregate,
        vec![
            "/repo/spec/math_spec.rs:3".to_string(),
            "/repo/src/runner.rs:40".to_string(),
        ],
    )
}

#[test]
fn report_kind_prefers_fixed_over_pending() {
    let example = ExampleContext {
        status: ExecutionStatus::Pending,
        pending_fixed: true,
        pending_message: Some("flaky".to_string()),
        ..ExampleContext::default()
    };
    assert_eq!(
        ReportKind::of(&example),
        ReportKind::Fixed {
            message: "flaky".to_string()
        }
    );
    let pending = ExampleContext {
        status: ExecutionStatus::Pending,
        ..ExampleContext::default()
    };
    assert_eq!(
        ReportKind::of(&pending),
        ReportKind::Pending {
            message: "No reason given".to_string()
        }
    );
    assert_eq!(ReportKind::of(&ExampleContext::default()), ReportKind::Failed);
}

#[test]
fn kind_options_only_override_their_own_fields() {
    let failed = kind_options(&ReportKind::Failed);
    assert!(failed.message_color.is_none());
    assert!(failed.detail_formatter.is_none());
    assert_eq!(failed.indentation, 2);

    let pending = kind_options(&ReportKind::Pending {
        message: "later".to_string(),
    });
    assert_eq!(pending.message_color, Some(Style::Pending));
    assert_eq!(
        pending.detail_formatter,
        Some(DetailFormatter::PendingMessage {
            message: "later".to_string()
        })
    );
    assert!(pending.failure_lines.is_none());

    let fixed = kind_options(&ReportKind::Fixed {
        message: "flaky".to_string(),
    });
    assert_eq!(fixed.message_color, Some(Style::Fixed));
    assert_eq!(fixed.description_formatter, Some(DescriptionFormatter::Fixed));
    assert_eq!(
        fixed.failure_lines,
        Some(vec![
            "Expected pending 'flaky' to fail. No error was raised.".to_string()
        ])
    );
}

#[test]
fn pending_example_reports_pending_exception_with_message_detail() {
    let ctx = repo_ctx(MapLocator::default());
    let example = ExampleContext {
        full_description: "syncs later".to_string(),
        status: ExecutionStatus::Pending,
        pending_exception: Some(Arc::new(FailureRecord::new("RuntimeError", "not yet"))),
        exception: Some(Arc::new(FailureRecord::new("Ignored", "never shown"))),
        pending_message: Some("waiting on api".to_string()),
        ..ExampleContext::default()
    };
    let out = build_presenter(&example, &ctx)
        .unwrap()
        .fully_formatted("4", &NullStyler);
    similar_asserts::assert_eq!(
        out,
        [
            "",
            "  4) syncs later",
            "     # waiting on api",
            "     Failure/Error: Unable to find matching line from backtrace",
            "     RuntimeError:",
            "       not yet",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn fixed_pending_example_reports_synthetic_line() {
    let ctx = repo_ctx(MapLocator::default());
    let example = ExampleContext {
        full_description: "thing works".to_string(),
        status: ExecutionStatus::Failed,
        pending_fixed: true,
        pending_message: Some("flaky".to_string()),
        exception: Some(Arc::new(FailureRecord::pending_fixed(
            "Expected example to fail since it is pending, but it passed.",
        ))),
        ..ExampleContext::default()
    };
    let out = build_presenter(&example, &ctx)
        .unwrap()
        .fully_formatted("1", &NullStyler);
    assert_eq!(
        out,
        "\n  1) thing works FIXED\n     Expected pending 'flaky' to fail. No error was raised.\n"
    );
}

#[test]
fn example_without_failure_has_no_presenter() {
    let ctx = repo_ctx(MapLocator::default());
    let example = ExampleContext {
        status: ExecutionStatus::Pending,
        ..ExampleContext::default()
    };
    assert!(build_presenter(&example, &ctx).is_none());
}

#[test]
fn aggregate_options_replace_failure_lines_and_hide_backtrace() {
    let failure = Arc::new(math_aggregate(true));
    let example = ExampleContext::default();
    let options = build_options(&example, &failure);
    assert_eq!(options.failure_lines, Some(vec![]));
    assert!(options.description_formatter.is_none());
    assert!(options.extra_detail_formatter.is_some());
    assert!(options.backtrace_formatter.is_some());
    assert_eq!(
        options.detail_formatter,
        Some(DetailFormatter::AggregateSummary {
            line: "Got 1 failure and 1 other error:".to_string(),
            color: Style::Failure,
            prior: None,
        })
    );
}

#[test]
fn aggregate_renders_truncated_numbered_sub_failures() {
    let ctx = repo_ctx(math_locator());
    let example = ExampleContext::failed("adds numbers", math_aggregate(true));
    let out = build_presenter(&example, &ctx)
        .unwrap()
        .fully_formatted("1", &NullStyler);
    similar_asserts::assert_eq!(
        out,
        [
            "",
            "  1) adds numbers",
            "     Got 1 failure and 1 other error:",
            "",
            "     1.1) Failure/Error: expect(1).to eq(2)",
            "            expected 1, got 2",
            "          # ./spec/math_spec.rs:5",
            "",
            "     1.2) Failure/Error: raise \"boom\"",
            "          RuntimeError:",
            "            boom",
            "          # ./spec/math_spec.rs:6",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn visible_aggregate_backtrace_uses_summary_with_period() {
    let ctx = repo_ctx(math_locator());
    let example = ExampleContext::failed("adds numbers", math_aggregate(false));
    let out = build_presenter(&example, &ctx)
        .unwrap()
        .fully_formatted("1", &NullStyler);
    assert!(out.starts_with(
        "\n  1) adds numbers\n     Got 1 failure and 1 other error.\n     # ./spec/math_spec.rs:3\n     # ./src/runner.rs:40\n"
    ));
}

#[test]
fn pending_aggregate_keeps_pending_detail_before_summary() {
    let ctx = repo_ctx(math_locator());
    let example = ExampleContext {
        full_description: "adds later".to_string(),
        status: ExecutionStatus::Pending,
        pending_message: Some("rounding".to_string()),
        pending_exception: Some(Arc::new(math_aggregate(true))),
        ..ExampleContext::default()
    };
    let out = build_presenter(&example, &ctx)
        .unwrap()
        .fully_formatted("2", &NullStyler);
    assert!(out.starts_with(
        "\n  2) adds later\n     # rounding\n     Got 1 failure and 1 other error:\n\n     2.1) "
    ));
}
