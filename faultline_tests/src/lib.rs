use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use faultline::config::ReportConfig;
use faultline::error::SourceLineError;
use faultline::format::ctx::{Ctx, make_ctx};
use faultline::format::source::SourceLocator;

/// Source lines served from memory, keyed by absolute path and 1-based line.
#[derive(Debug, Default)]
pub struct InMemorySource {
    lines: BTreeMap<(String, usize), String>,
}

impl InMemorySource {
    pub fn with_line(mut self, path: &str, line: usize, text: &str) -> Self {
        self.lines.insert((path.to_string(), line), text.to_string());
        self
    }
}

impl SourceLocator for InMemorySource {
    fn line_at(&self, path: &str, line_number: usize) -> Result<String, SourceLineError> {
        self.lines
            .get(&(path.to_string(), line_number))
            .cloned()
            .ok_or_else(|| SourceLineError::NoSuchFile {
                path: path.to_string(),
            })
    }
}

pub fn repo_ctx(source: InMemorySource) -> Ctx {
    make_ctx(ReportConfig {
        project_root: Some(PathBuf::from("/repo")),
        ..ReportConfig::default()
    })
    .unwrap()
    .with_source_locator(Arc::new(source))
}

pub fn framed(text: &str) -> String {
    format!("---{text}---")
}
