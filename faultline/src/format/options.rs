use std::sync::Arc;

use crate::example::{ExampleContext, ExecutionStatus};
use crate::failure::FailureRecord;
use crate::format::backtrace::BacktraceFormatter;
use crate::format::ctx::Ctx;
use crate::format::factory;
use crate::format::presenter::FailurePresenter;
use crate::format::styler::{Style, Styler};

pub const DEFAULT_INDENTATION: usize = 2;

/// How an example's outcome shapes its report. Exactly one applies; a fixed
/// pending example wins over a plain pending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    Failed,
    Pending { message: String },
    Fixed { message: String },
}

impl ReportKind {
    pub fn of(example: &ExampleContext) -> Self {
        if example.pending_fixed {
            ReportKind::Fixed {
                message: example.pending_message_or_default().to_string(),
            }
        } else if example.status == ExecutionStatus::Pending {
            ReportKind::Pending {
                message: example.pending_message_or_default().to_string(),
            }
        } else {
            ReportKind::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormatter {
    FullDescription,
    /// `"<full description> FIXED"`
    Fixed,
    /// The failure's own `Failure/Error: <line>`; used for sub-failures.
    FailedLine,
    /// No description; the detail line stands in for it.
    Empty,
}

impl DescriptionFormatter {
    pub fn describe(self, presenter: &FailurePresenter<'_>) -> Option<String> {
        let example = presenter.example();
        match self {
            DescriptionFormatter::FullDescription => Some(example.full_description.clone()),
            DescriptionFormatter::Fixed => Some(format!("{} FIXED", example.full_description)),
            DescriptionFormatter::FailedLine => Some(presenter.failure_slash_error_line().to_string()),
            DescriptionFormatter::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailFormatter {
    /// `"# <pending message>"`
    PendingMessage { message: String },
    /// Summary line of an aggregate, after whatever detail was set before.
    AggregateSummary {
        line: String,
        color: Style,
        prior: Option<Box<DetailFormatter>>,
    },
}

impl DetailFormatter {
    pub fn render(&self, styler: &dyn Styler, indentation: &str) -> Option<String> {
        match self {
            DetailFormatter::PendingMessage { message } => {
                Some(styler.wrap(&format!("# {message}"), Style::Detail))
            }
            DetailFormatter::AggregateSummary { line, color, prior } => {
                let summary = styler.wrap(line, *color);
                let prior = prior
                    .as_ref()
                    .and_then(|prior| prior.render(styler, indentation));
                Some(match prior {
                    Some(prior) => format!("{prior}\n{indentation}{summary}"),
                    None => summary,
                })
            }
        }
    }
}

/// Renders each child of an aggregate as its own numbered sub-report.
#[derive(Debug, Clone)]
pub struct SubFailureList {
    pub aggregate: Arc<FailureRecord>,
    pub message_color: Option<Style>,
}

impl SubFailureList {
    pub fn render(
        &self,
        failure_number: &str,
        styler: &dyn Styler,
        indentation: &str,
        example: &ExampleContext,
        ctx: &Ctx,
    ) -> String {
        factory::format_sub_failures(self, failure_number, styler, indentation, example, ctx)
    }
}

#[derive(Debug, Clone)]
pub struct PresentationOptions {
    /// `None` falls back to the failure style.
    pub message_color: Option<Style>,
    /// `None` falls back to the example's full description.
    pub description_formatter: Option<DescriptionFormatter>,
    pub detail_formatter: Option<DetailFormatter>,
    pub extra_detail_formatter: Option<SubFailureList>,
    /// `None` falls back to the context's formatter.
    pub backtrace_formatter: Option<Arc<dyn BacktraceFormatter>>,
    pub indentation: usize,
    pub skip_shared_group_trace: bool,
    pub failure_lines: Option<Vec<String>>,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            message_color: None,
            description_formatter: None,
            detail_formatter: None,
            extra_detail_formatter: None,
            backtrace_formatter: None,
            indentation: DEFAULT_INDENTATION,
            skip_shared_group_trace: false,
            failure_lines: None,
        }
    }
}
