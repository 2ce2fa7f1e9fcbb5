use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FaultlineError;
use crate::example::{ExampleContext, ExampleMetadata, ExecutionStatus, SharedGroupFrame};
use crate::failure::{AggregateFailure, FailureKind, FailureRecord};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDump {
    #[serde(default)]
    pub examples: Vec<ExampleDump>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleDump {
    pub full_description: String,
    #[serde(default)]
    pub status: ExecutionStatus,
    pub exception: Option<FailureRecordDump>,
    pub pending_exception: Option<FailureRecordDump>,
    pub pending_message: Option<String>,
    #[serde(default)]
    pub pending_fixed: bool,
    #[serde(default)]
    pub shared_group_inclusion_backtrace: Vec<SharedGroupFrame>,
    #[serde(default)]
    pub metadata: ExampleMetadata,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecordDump {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub backtrace: Vec<String>,
    #[serde(default)]
    pub kind: FailureKind,
    pub cause: Option<Box<FailureRecordDump>>,
    pub aggregate: Option<AggregateDump>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateDump {
    #[serde(default)]
    pub failures: Vec<FailureRecordDump>,
    pub hide_backtrace: Option<bool>,
    pub block_label: Option<String>,
}

impl FailureDump {
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, FaultlineError> {
        serde_json::from_str(text).map_err(|err| FaultlineError::DumpParse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn into_examples(self) -> Vec<ExampleContext> {
        self.examples.into_iter().map(ExampleContext::from).collect()
    }
}

impl From<FailureRecordDump> for FailureRecord {
    fn from(dump: FailureRecordDump) -> Self {
        let record = match dump.aggregate {
            Some(aggregate) => {
                let mut collected = AggregateFailure::new(
                    aggregate
                        .failures
                        .into_iter()
                        .map(|child| Arc::new(FailureRecord::from(child))),
                );
                if let Some(hide) = aggregate.hide_backtrace {
                    collected = collected.with_hide_backtrace(hide);
                }
                if let Some(label) = aggregate.block_label {
                    collected = collected.with_block_label(label);
                }
                FailureRecord::from_aggregate(collected, dump.backtrace)
            }
            None => FailureRecord::new(dump.class_name, dump.message)
                .with_backtrace(dump.backtrace)
                .with_kind(dump.kind),
        };
        match dump.cause {
            Some(cause) => record.with_cause(FailureRecord::from(*cause)),
            None => record,
        }
    }
}

impl From<ExampleDump> for ExampleContext {
    fn from(dump: ExampleDump) -> Self {
        ExampleContext {
            full_description: dump.full_description,
            status: dump.status,
            exception: dump.exception.map(|record| Arc::new(record.into())),
            pending_exception: dump.pending_exception.map(|record| Arc::new(record.into())),
            pending_message: dump.pending_message,
            pending_fixed: dump.pending_fixed,
            shared_group_inclusion_backtrace: dump.shared_group_inclusion_backtrace,
            metadata: dump.metadata,
        }
    }
}
