use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use path_slash::PathExt;
use regex::Regex;

use crate::config::ReportConfig;
use crate::error::FaultlineError;
use crate::format::backtrace::{BacktraceFormatter, FilteringBacktraceFormatter};
use crate::format::source::{FsSourceLocator, SourceLocator, resolve_frame_path};

/// Everything report building reads besides the failure and its example.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub config: ReportConfig,
    pub project_root: String,
    pub in_project_source: Regex,
    pub loaded_spec_files: IndexSet<String>,
    pub backtrace_formatter: Arc<dyn BacktraceFormatter>,
    pub source_locator: Arc<dyn SourceLocator>,
}

impl Ctx {
    pub fn with_source_locator(mut self, locator: Arc<dyn SourceLocator>) -> Self {
        self.source_locator = locator;
        self
    }

    pub fn with_backtrace_formatter(mut self, formatter: Arc<dyn BacktraceFormatter>) -> Self {
        self.backtrace_formatter = formatter;
        self
    }
}

pub fn make_ctx(config: ReportConfig) -> Result<Ctx, FaultlineError> {
    let root = config
        .project_root
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let project_root = canonical_slash_path(&root);

    let pattern = config
        .in_project_source_dir_regex
        .clone()
        .unwrap_or_else(|| default_in_project_pattern(&project_root, &config.project_source_dirs));
    let in_project_source =
        Regex::new(&pattern).map_err(|source| FaultlineError::InvalidPattern {
            field: "inProjectSourceDirRegex",
            pattern: pattern.clone(),
            source,
        })?;

    let loaded_spec_files = config
        .loaded_spec_files
        .iter()
        .map(|file| resolve_frame_path(&project_root, file))
        .collect::<IndexSet<_>>();

    let backtrace_formatter = FilteringBacktraceFormatter::new(
        &config.backtrace_exclusion_patterns,
        &config.backtrace_inclusion_patterns,
        config.full_backtrace,
        project_root.clone(),
    )?;

    Ok(Ctx {
        config,
        project_root,
        in_project_source,
        loaded_spec_files,
        backtrace_formatter: Arc::new(backtrace_formatter),
        source_locator: Arc::new(FsSourceLocator::new()),
    })
}

fn canonical_slash_path(path: &Path) -> String {
    dunce::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_slash_lossy()
        .trim_end_matches('/')
        .to_string()
}

fn default_in_project_pattern(project_root: &str, source_dirs: &[String]) -> String {
    let escaped_root = regex::escape(project_root);
    let dirs = source_dirs
        .iter()
        .map(|dir| regex::escape(dir.trim_matches('/')))
        .collect::<Vec<_>>()
        .join("|");
    format!("^{escaped_root}/({dirs})/")
}
