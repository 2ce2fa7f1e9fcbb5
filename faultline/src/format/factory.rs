use std::sync::Arc;

use crate::example::ExampleContext;
use crate::failure::FailureRecord;
use crate::format::backtrace::EmptyBacktraceFormatter;
use crate::format::ctx::Ctx;
use crate::format::options::{
    DescriptionFormatter, DetailFormatter, PresentationOptions, ReportKind, SubFailureList,
};
use crate::format::presenter::FailurePresenter;
use crate::format::styler::{Style, Styler};
use crate::format::truncate::truncate;

/// Presenter for the example's reported failure, or `None` when the example
/// has nothing to report.
pub fn build_presenter<'a>(example: &'a ExampleContext, ctx: &'a Ctx) -> Option<FailurePresenter<'a>> {
    let failure = example.reported_failure()?;
    let options = build_options(example, failure);
    Some(FailurePresenter::new(Arc::clone(failure), example, ctx, options))
}

pub fn build_options(example: &ExampleContext, failure: &Arc<FailureRecord>) -> PresentationOptions {
    with_aggregate_options_as_needed(failure, kind_options(&ReportKind::of(example)))
}

pub fn kind_options(kind: &ReportKind) -> PresentationOptions {
    match kind {
        ReportKind::Failed => PresentationOptions::default(),
        ReportKind::Pending { message } => PresentationOptions {
            message_color: Some(Style::Pending),
            detail_formatter: Some(DetailFormatter::PendingMessage {
                message: message.clone(),
            }),
            ..PresentationOptions::default()
        },
        ReportKind::Fixed { message } => PresentationOptions {
            description_formatter: Some(DescriptionFormatter::Fixed),
            message_color: Some(Style::Fixed),
            failure_lines: Some(vec![format!(
                "Expected pending '{message}' to fail. No error was raised."
            )]),
            ..PresentationOptions::default()
        },
    }
}

/// Leaves `options` alone unless `failure` is an aggregate; otherwise its
/// children become numbered sub-reports under a summary line.
pub fn with_aggregate_options_as_needed(
    failure: &Arc<FailureRecord>,
    mut options: PresentationOptions,
) -> PresentationOptions {
    let Some(aggregate) = failure.as_aggregate() else {
        return options;
    };

    let color = options.message_color;
    let line = if aggregate.hide_backtrace() {
        format!("Got {}:", aggregate.exception_count_description())
    } else {
        format!("{}.", aggregate.summary())
    };

    options.failure_lines = Some(vec![]);
    options.extra_detail_formatter = Some(SubFailureList {
        aggregate: Arc::clone(failure),
        message_color: color,
    });
    options.detail_formatter = Some(DetailFormatter::AggregateSummary {
        line,
        color: color.unwrap_or(Style::Failure),
        prior: options.detail_formatter.take().map(Box::new),
    });
    if options.description_formatter.is_some() {
        options.description_formatter = Some(DescriptionFormatter::Empty);
    }
    if aggregate.hide_backtrace() {
        options.backtrace_formatter = Some(Arc::new(EmptyBacktraceFormatter));
    }
    options
}

pub(crate) fn format_sub_failures(
    sub_failures: &SubFailureList,
    failure_number: &str,
    styler: &dyn Styler,
    indentation: &str,
    example: &ExampleContext,
    ctx: &Ctx,
) -> String {
    let Some(aggregate) = sub_failures.aggregate.as_aggregate() else {
        return String::new();
    };
    let parent_backtrace = sub_failures.aggregate.backtrace();

    aggregate
        .child_failures()
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let options = with_aggregate_options_as_needed(
                child,
                PresentationOptions {
                    description_formatter: Some(DescriptionFormatter::FailedLine),
                    indentation: indentation.len(),
                    message_color: Some(sub_failures.message_color.unwrap_or(Style::Failure)),
                    skip_shared_group_trace: true,
                    ..PresentationOptions::default()
                },
            );
            let child = truncate(parent_backtrace, child);
            FailurePresenter::new(child, example, ctx, options)
                .fully_formatted(&format!("{failure_number}.{}", index + 1), styler)
        })
        .collect()
}
