use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::error::FaultlineError;
use crate::example::ExampleMetadata;
use crate::format::source::parse_frame_location;

pub trait BacktraceFormatter: fmt::Debug + Send + Sync {
    fn format_backtrace(&self, backtrace: &[String], metadata: &ExampleMetadata) -> Vec<String>;
}

/// Hides the whole trace. Used for aggregates whose own backtrace only points
/// at the aggregation block.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBacktraceFormatter;

impl BacktraceFormatter for EmptyBacktraceFormatter {
    fn format_backtrace(&self, _backtrace: &[String], _metadata: &ExampleMetadata) -> Vec<String> {
        vec![]
    }
}

#[derive(Debug, Clone)]
pub struct FilteringBacktraceFormatter {
    exclusion_patterns: Vec<Regex>,
    inclusion_patterns: Vec<Regex>,
    full_backtrace: bool,
    project_root: String,
}

impl FilteringBacktraceFormatter {
    pub fn new(
        exclusion_patterns: &[String],
        inclusion_patterns: &[String],
        full_backtrace: bool,
        project_root: impl Into<String>,
    ) -> Result<Self, FaultlineError> {
        Ok(Self {
            exclusion_patterns: compile_patterns("backtraceExclusionPatterns", exclusion_patterns)?,
            inclusion_patterns: compile_patterns("backtraceInclusionPatterns", inclusion_patterns)?,
            full_backtrace,
            project_root: project_root.into(),
        })
    }

    pub fn is_excluded(&self, frame: &str) -> bool {
        self.exclusion_patterns.iter().any(|re| re.is_match(frame))
            && !self.inclusion_patterns.iter().any(|re| re.is_match(frame))
    }

    pub fn backtrace_line(&self, frame: &str) -> String {
        let root = self.project_root.trim_end_matches('/');
        if root.is_empty() {
            return frame.to_string();
        }
        if let Some(rest) = frame.strip_prefix(root).and_then(|rest| rest.strip_prefix('/')) {
            return format!("./{rest}");
        }
        if is_project_relative(frame) {
            return format!("./{}", frame.strip_prefix("./").unwrap_or(frame));
        }
        frame.to_string()
    }
}

/// `path:line` frames with a relative path; these resolve under the project root.
fn is_project_relative(frame: &str) -> bool {
    !frame.starts_with('<')
        && parse_frame_location(frame).is_some_and(|loc| !Path::new(&loc.path).is_absolute())
}

impl BacktraceFormatter for FilteringBacktraceFormatter {
    fn format_backtrace(&self, backtrace: &[String], metadata: &ExampleMetadata) -> Vec<String> {
        let full = self.full_backtrace || metadata.full_backtrace == Some(true);
        let kept = backtrace
            .iter()
            .filter(|frame| full || !self.is_excluded(frame))
            .collect::<Vec<_>>();
        let kept = if kept.is_empty() {
            backtrace.iter().collect::<Vec<_>>()
        } else {
            kept
        };
        kept.into_iter()
            .map(|frame| self.backtrace_line(frame))
            .collect()
    }
}

fn compile_patterns(field: &'static str, patterns: &[String]) -> Result<Vec<Regex>, FaultlineError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| FaultlineError::InvalidPattern {
                field,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
