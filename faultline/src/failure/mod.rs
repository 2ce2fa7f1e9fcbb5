use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod aggregate;


pub use aggregate::AggregateFailure;

/// Substring that marks a class name as coming from the assertion layer when a
/// record carries no explicit [`FailureKind`].
pub const FRAMEWORK_MARKER: &str = "Faultline";
pub const ANONYMOUS_CLASS_NAME: &str = "(anonymous error class)";
pub const AGGREGATE_CLASS_NAME: &str = "Faultline::MultipleExpectationsNotMetError";
pub const PENDING_FIXED_CLASS_NAME: &str = "Faultline::PendingExampleFixedError";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Raised by the assertion layer (an expectation that was not met).
    Framework,
    /// Any other error raised while the example ran.
    Runtime,
    /// Sentinel raised when a pending example unexpectedly passes.
    PendingFixed,
    /// Not tagged by the producer; classified by class name.
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    class_name: String,
    message: String,
    backtrace: Vec<String>,
    kind: FailureKind,
    cause: Option<Arc<FailureRecord>>,
    aggregate: Option<Arc<AggregateFailure>>,
}

impl FailureRecord {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            backtrace: vec![],
            kind: FailureKind::Unknown,
            cause: None,
            aggregate: None,
        }
    }

    pub fn pending_fixed(message: impl Into<String>) -> Self {
        Self::new(PENDING_FIXED_CLASS_NAME, message).with_kind(FailureKind::PendingFixed)
    }

    /// Wraps a finished aggregate. The aggregate is frozen from here on.
    pub fn from_aggregate(aggregate: AggregateFailure, backtrace: Vec<String>) -> Self {
        Self {
            class_name: AGGREGATE_CLASS_NAME.to_string(),
            message: aggregate.message(),
            backtrace,
            kind: FailureKind::Framework,
            cause: None,
            aggregate: Some(Arc::new(aggregate)),
        }
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = frames.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_cause(mut self, cause: impl Into<Arc<FailureRecord>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Derived copy carrying a different backtrace; `self` is left untouched.
    pub fn with_replaced_backtrace(&self, backtrace: Vec<String>) -> Self {
        Self {
            backtrace,
            ..self.clone()
        }
    }

    pub fn raw_class_name(&self) -> &str {
        &self.class_name
    }

    pub fn class_name(&self) -> &str {
        if self.class_name.trim().is_empty() {
            ANONYMOUS_CLASS_NAME
        } else {
            &self.class_name
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn cause(&self) -> Option<&Arc<FailureRecord>> {
        self.cause.as_ref()
    }

    pub fn as_aggregate(&self) -> Option<&AggregateFailure> {
        self.aggregate.as_deref()
    }

    pub fn is_framework_failure(&self) -> bool {
        match self.kind {
            FailureKind::Framework => true,
            FailureKind::Runtime | FailureKind::PendingFixed => false,
            FailureKind::Unknown => self.class_name.contains(FRAMEWORK_MARKER),
        }
    }

    pub fn is_pending_fixed_marker(&self) -> bool {
        match self.kind {
            FailureKind::PendingFixed => true,
            FailureKind::Unknown => self.class_name == PENDING_FIXED_CLASS_NAME,
            FailureKind::Framework | FailureKind::Runtime => false,
        }
    }

    /// Last record of the cause chain. Stops at the first repeat so a
    /// malformed cyclic chain still terminates.
    pub fn root_cause(&self) -> &FailureRecord {
        let mut seen: Vec<*const FailureRecord> = vec![self as *const _];
        let mut current = self;
        while let Some(next) = current.cause.as_deref() {
            let ptr = next as *const FailureRecord;
            if seen.contains(&ptr) {
                break;
            }
            seen.push(ptr);
            current = next;
        }
        current
    }
}
