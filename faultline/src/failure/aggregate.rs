use std::fmt;
use std::sync::Arc;

use crate::failure::FailureRecord;
use crate::format::helpers::pluralize;

/// Every failure collected for one example once a second one shows up.
///
/// Children keep discovery order. Each child also lands in exactly one of
/// `framework_failures` / `other_errors`, so the two always partition
/// `child_failures`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFailure {
    child_failures: Vec<Arc<FailureRecord>>,
    framework_failures: Vec<Arc<FailureRecord>>,
    other_errors: Vec<Arc<FailureRecord>>,
    hide_backtrace: bool,
    block_label: Option<String>,
}

impl Default for AggregateFailure {
    fn default() -> Self {
        Self {
            child_failures: vec![],
            framework_failures: vec![],
            other_errors: vec![],
            hide_backtrace: true,
            block_label: None,
        }
    }
}

impl AggregateFailure {
    pub fn new<I>(failures: I) -> Self
    where
        I: IntoIterator<Item = Arc<FailureRecord>>,
    {
        let mut aggregate = Self::default();
        failures.into_iter().for_each(|failure| {
            aggregate.add(failure);
        });
        aggregate
    }

    pub fn with_block_label(mut self, label: impl Into<String>) -> Self {
        self.block_label = Some(label.into());
        self
    }

    pub fn with_hide_backtrace(mut self, hide_backtrace: bool) -> Self {
        self.hide_backtrace = hide_backtrace;
        self
    }

    /// Appends `failure` unless it is the fixed-pending sentinel. Returns
    /// whether it was kept.
    pub fn add(&mut self, failure: Arc<FailureRecord>) -> bool {
        if failure.is_pending_fixed_marker() {
            tracing::debug!(
                class_name = failure.class_name(),
                "dropping fixed-pending marker from aggregate"
            );
            return false;
        }
        if failure.is_framework_failure() {
            self.framework_failures.push(Arc::clone(&failure));
        } else {
            self.other_errors.push(Arc::clone(&failure));
        }
        self.child_failures.push(failure);
        true
    }

    pub fn child_failures(&self) -> &[Arc<FailureRecord>] {
        &self.child_failures
    }

    pub fn framework_failures(&self) -> &[Arc<FailureRecord>] {
        &self.framework_failures
    }

    pub fn other_errors(&self) -> &[Arc<FailureRecord>] {
        &self.other_errors
    }

    pub fn hide_backtrace(&self) -> bool {
        self.hide_backtrace
    }

    pub fn block_label(&self) -> Option<&str> {
        self.block_label.as_deref()
    }

    pub fn exception_count_description(&self) -> String {
        let failure_count = pluralize(self.framework_failures.len(), "failure");
        if self.other_errors.is_empty() {
            return failure_count;
        }
        let error_count = pluralize(self.other_errors.len(), "other error");
        format!("{failure_count} and {error_count}")
    }

    pub fn summary(&self) -> String {
        match self.block_label.as_deref() {
            Some(label) => format!(
                "Got {} from failure aggregation block {label:?}",
                self.exception_count_description()
            ),
            None => format!("Got {}", self.exception_count_description()),
        }
    }

    /// Plain-text listing: the summary, then every child numbered, framework
    /// failures first.
    pub fn message(&self) -> String {
        let entries = self
            .framework_failures
            .iter()
            .map(|failure| failure.message().to_string())
            .chain(
                self.other_errors
                    .iter()
                    .map(|error| format!("{}: {}", error.class_name(), error.message())),
            )
            .zip(
                self.framework_failures
                    .iter()
                    .chain(self.other_errors.iter()),
            )
            .collect::<Vec<_>>();

        let label_width = format!("  {}) ", entries.len()).len();
        let enumerated = entries
            .iter()
            .enumerate()
            .map(|(index, (text, failure))| {
                let label = format!("  {}) ", index + 1);
                let padding = " ".repeat(label_width - label.len());
                let continuation = " ".repeat(label_width);
                let mut lines = text.trim().lines();
                let first = lines.next().unwrap_or_default();
                let mut block = format!("{label}{padding}{first}");
                lines
                    .chain(failure.backtrace().first().map(String::as_str))
                    .for_each(|line| {
                        block.push('\n');
                        if !line.is_empty() {
                            block.push_str(&continuation);
                            block.push_str(line);
                        }
                    });
                block
            })
            .collect::<Vec<_>>();

        format!("{}:\n\n{}", self.summary(), enumerated.join("\n\n"))
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
