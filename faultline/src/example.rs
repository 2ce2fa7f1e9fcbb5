use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::failure::FailureRecord;

pub const NO_REASON_GIVEN: &str = "No reason given";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionStatus {
    Passed,
    #[default]
    Failed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SharedGroupFrame {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExampleMetadata {
    pub full_backtrace: Option<bool>,
    pub extra_failure_lines: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// What the test-execution side knows about one example once it finished.
#[derive(Debug, Clone, Default)]
pub struct ExampleContext {
    pub full_description: String,
    pub status: ExecutionStatus,
    pub exception: Option<Arc<FailureRecord>>,
    pub pending_exception: Option<Arc<FailureRecord>>,
    pub pending_message: Option<String>,
    pub pending_fixed: bool,
    pub shared_group_inclusion_backtrace: Vec<SharedGroupFrame>,
    pub metadata: ExampleMetadata,
}

impl ExampleContext {
    pub fn failed(full_description: impl Into<String>, exception: FailureRecord) -> Self {
        Self {
            full_description: full_description.into(),
            status: ExecutionStatus::Failed,
            exception: Some(Arc::new(exception)),
            ..Self::default()
        }
    }

    /// The record a report is built for: the pending exception for pending
    /// examples, the execution exception otherwise.
    pub fn reported_failure(&self) -> Option<&Arc<FailureRecord>> {
        match self.status {
            ExecutionStatus::Pending => self.pending_exception.as_ref(),
            ExecutionStatus::Passed | ExecutionStatus::Failed => self.exception.as_ref(),
        }
    }

    pub fn pending_message_or_default(&self) -> &str {
        self.pending_message.as_deref().unwrap_or(NO_REASON_GIVEN)
    }
}
