use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::example::ExampleContext;
use crate::failure::FailureRecord;
use crate::format::backtrace::BacktraceFormatter;
use crate::format::ctx::Ctx;
use crate::format::options::{DescriptionFormatter, PresentationOptions};
use crate::format::source::read_failed_line;
use crate::format::styler::{NullStyler, Style, Styler};

pub const CAUSE_SEPARATOR: [&str; 2] = ["------------------", "--- Caused by: ---"];

/// Turns one failure of one example into report text.
///
/// Nothing here fails: missing frames, unreadable sources and empty messages
/// all degrade into plain text.
#[derive(Debug)]
pub struct FailurePresenter<'a> {
    failure: Arc<FailureRecord>,
    example: &'a ExampleContext,
    ctx: &'a Ctx,
    options: PresentationOptions,
    description: Option<String>,
    failed_line: OnceCell<String>,
    failure_lines: OnceCell<Vec<String>>,
}

impl<'a> FailurePresenter<'a> {
    pub fn new(
        failure: Arc<FailureRecord>,
        example: &'a ExampleContext,
        ctx: &'a Ctx,
        options: PresentationOptions,
    ) -> Self {
        let formatter = options
            .description_formatter
            .unwrap_or(DescriptionFormatter::FullDescription);
        let mut presenter = Self {
            failure,
            example,
            ctx,
            options,
            description: None,
            failed_line: OnceCell::new(),
            failure_lines: OnceCell::new(),
        };
        presenter.description = formatter.describe(&presenter);
        presenter
    }

    pub fn failure(&self) -> &Arc<FailureRecord> {
        &self.failure
    }

    pub fn example(&self) -> &'a ExampleContext {
        self.example
    }

    pub fn options(&self) -> &PresentationOptions {
        &self.options
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn message_color(&self) -> Style {
        self.options.message_color.unwrap_or(Style::Failure)
    }

    pub fn failure_slash_error_line(&self) -> &str {
        self.failed_line.get_or_init(|| {
            let line = read_failed_line(self.failure.backtrace(), self.ctx);
            format!("Failure/Error: {}", line.trim())
        })
    }

    pub fn failure_lines(&self) -> &[String] {
        self.failure_lines.get_or_init(|| match &self.options.failure_lines {
            Some(lines) => lines.clone(),
            None => self.computed_failure_lines(),
        })
    }

    pub fn message_lines(&self) -> Vec<String> {
        self.with_shared_group_lines(self.failure_lines().to_vec(), &NullStyler)
    }

    pub fn colorized_message_lines(&self, styler: &dyn Styler) -> Vec<String> {
        let color = self.message_color();
        self.with_shared_group_lines(self.failure_lines().to_vec(), styler)
            .into_iter()
            .map(|line| styler.wrap(&line, color))
            .collect()
    }

    pub fn formatted_backtrace(&self) -> Vec<String> {
        self.formatted_backtrace_for(&self.failure)
    }

    pub fn formatted_backtrace_for(&self, record: &FailureRecord) -> Vec<String> {
        let mut lines = self
            .backtrace_formatter()
            .format_backtrace(record.backtrace(), &self.example.metadata);
        lines.extend(self.formatted_cause(record));
        lines
    }

    pub fn formatted_cause(&self, record: &FailureRecord) -> Vec<String> {
        if record.cause().is_none() {
            return vec![];
        }
        let root = record.root_cause();
        let mut lines = CAUSE_SEPARATOR
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>();
        if !root.is_framework_failure() {
            lines.push(format!("{}:", root.class_name()));
        }
        lines.extend(root.message().lines().map(|line| format!("  {line}")));

        let frames = self
            .backtrace_formatter()
            .format_backtrace(root.backtrace(), &self.example.metadata);
        let shown = if self.ctx.config.full_cause_backtrace {
            frames.len()
        } else {
            1
        };
        lines.extend(frames.into_iter().take(shown).map(|frame| format!("  {frame}")));
        lines
    }

    pub fn colorized_formatted_backtrace(&self, styler: &dyn Styler) -> Vec<String> {
        self.formatted_backtrace()
            .into_iter()
            .map(|line| styler.wrap(&format!("# {line}"), Style::Detail))
            .collect()
    }

    pub fn fully_formatted(&self, failure_number: &str, styler: &dyn Styler) -> String {
        let alignment_basis = format!("{}{failure_number}) ", " ".repeat(self.options.indentation));
        let indentation = " ".repeat(alignment_basis.len());
        let extra = self
            .options
            .extra_detail_formatter
            .as_ref()
            .map(|sub_failures| {
                sub_failures.render(failure_number, styler, &indentation, self.example, self.ctx)
            })
            .unwrap_or_default();

        format!(
            "\n{alignment_basis}{}\n{}{extra}",
            self.description_and_detail(styler, &indentation),
            self.formatted_message_and_backtrace(styler, &indentation),
        )
    }

    fn description_and_detail(&self, styler: &dyn Styler, indentation: &str) -> String {
        let detail = self
            .options
            .detail_formatter
            .as_ref()
            .and_then(|formatter| formatter.render(styler, indentation));
        match (self.description.as_deref(), detail) {
            (Some(description), Some(detail)) => format!("{description}\n{indentation}{detail}"),
            (Some(description), None) => description.to_string(),
            (None, Some(detail)) => detail,
            (None, None) => String::new(),
        }
    }

    fn formatted_message_and_backtrace(&self, styler: &dyn Styler, indentation: &str) -> String {
        self.colorized_message_lines(styler)
            .into_iter()
            .chain(self.colorized_formatted_backtrace(styler))
            .map(|line| format!("{indentation}{line}\n"))
            .collect()
    }

    fn backtrace_formatter(&self) -> &dyn BacktraceFormatter {
        self.options
            .backtrace_formatter
            .as_deref()
            .unwrap_or(self.ctx.backtrace_formatter.as_ref())
    }

    fn computed_failure_lines(&self) -> Vec<String> {
        let mut lines = vec![];
        let failed_line = self.failure_slash_error_line();
        if self.description.as_deref() != Some(failed_line) {
            lines.push(failed_line.to_string());
        }
        if !self.failure.is_framework_failure() {
            lines.push(format!("{}:", self.failure.class_name()));
        }
        lines.extend(self.failure.message().lines().map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        }));
        lines.extend(self.extra_failure_lines());
        lines
    }

    fn extra_failure_lines(&self) -> Vec<String> {
        let extra = &self.example.metadata.extra_failure_lines;
        if extra.is_empty() {
            return vec![];
        }
        let mut lines = vec![];
        if extra.first().is_some_and(|line| !line.is_empty()) {
            lines.push(String::new());
        }
        lines.extend(extra.iter().cloned());
        if extra.last().is_some_and(|line| !line.is_empty()) {
            lines.push(String::new());
        }
        lines
    }

    fn with_shared_group_lines(&self, mut lines: Vec<String>, styler: &dyn Styler) -> Vec<String> {
        if self.options.skip_shared_group_trace {
            return lines;
        }
        lines.extend(
            self.example
                .shared_group_inclusion_backtrace
                .iter()
                .map(|frame| styler.wrap(&frame.description, Style::Default)),
        );
        lines
    }
}
