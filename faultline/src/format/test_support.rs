use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ReportConfig;
use crate::error::SourceLineError;
use crate::format::ctx::{Ctx, make_ctx};
use crate::format::source::SourceLocator;

#[derive(Debug, Default)]
pub(crate) struct MapLocator {
    lines: BTreeMap<(String, usize), String>,
}

impl MapLocator {
    pub(crate) fn with_line(mut self, path: &str, line: usize, text: &str) -> Self {
        self.lines.insert((path.to_string(), line), text.to_string());
        self
    }
}

impl SourceLocator for MapLocator {
    fn line_at(&self, path: &str, line_number: usize) -> Result<String, SourceLineError> {
        self.lines
            .get(&(path.to_string(), line_number))
            .cloned()
            .ok_or_else(|| SourceLineError::NoSuchFile {
                path: path.to_string(),
            })
    }
}

pub(crate) fn repo_config() -> ReportConfig {
    ReportConfig {
        project_root: Some(PathBuf::from("/repo")),
        ..ReportConfig::default()
    }
}

pub(crate) fn repo_ctx(locator: MapLocator) -> Ctx {
    make_ctx(repo_config())
        .unwrap()
        .with_source_locator(Arc::new(locator))
}
