use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use path_slash::PathExt;
use regex::Regex;

use crate::error::SourceLineError;
use crate::format::ctx::Ctx;

pub const NO_MATCHING_FRAME: &str = "Unable to find matching line from backtrace";

static FRAME_LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):(\d+)(?::\d+)?").unwrap());

pub trait SourceLocator: fmt::Debug + Send + Sync {
    /// `line_number` is 1-based.
    fn line_at(&self, path: &str, line_number: usize) -> Result<String, SourceLineError>;
}

/// Reads source files from disk, keeping each file's lines once read.
#[derive(Debug, Default)]
pub struct FsSourceLocator {
    cache: DashMap<String, Arc<Vec<String>>>,
}

impl FsSourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_source(&self, path: &str) -> Result<Arc<Vec<String>>, SourceLineError> {
        if let Some(hit) = self.cache.get(path) {
            return Ok(Arc::clone(hit.value()));
        }
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceLineError::NoSuchFile {
                path: path.to_string(),
            },
            _ => SourceLineError::Unreadable {
                path: path.to_string(),
                source,
            },
        })?;
        let lines = Arc::new(text.lines().map(str::to_string).collect::<Vec<_>>());
        self.cache.insert(path.to_string(), Arc::clone(&lines));
        Ok(lines)
    }
}

impl SourceLocator for FsSourceLocator {
    fn line_at(&self, path: &str, line_number: usize) -> Result<String, SourceLineError> {
        let lines = self.read_source(path)?;
        line_number
            .checked_sub(1)
            .and_then(|idx| lines.get(idx))
            .cloned()
            .ok_or_else(|| SourceLineError::NoSuchLine {
                path: path.to_string(),
                line: line_number,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLocation {
    pub path: String,
    pub line: usize,
}

/// Accepts `path:line` and `path:line:col`, ignoring anything after.
pub fn parse_frame_location(frame: &str) -> Option<FrameLocation> {
    let caps = FRAME_LOCATION_RE.captures(frame.trim())?;
    let path = caps.get(1)?.as_str().to_string();
    let line = caps.get(2)?.as_str().parse::<usize>().ok()?;
    Some(FrameLocation { path, line })
}

pub fn resolve_frame_path(project_root: &str, raw_path: &str) -> String {
    let normalized = raw_path
        .trim()
        .trim_matches(&['"', '\'', '`'][..])
        .replace('\\', "/");
    let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);
    let path = Path::new(normalized);
    if path.is_absolute() || project_root.is_empty() {
        return path.to_slash_lossy().to_string();
    }
    Path::new(project_root)
        .join(path)
        .to_slash_lossy()
        .to_string()
}

fn is_internal_frame(frame: &str) -> bool {
    frame.starts_with("<internal:")
}

fn is_in_project(ctx: &Ctx, frame: &str) -> bool {
    parse_frame_location(frame).is_some_and(|loc| {
        let absolute = resolve_frame_path(&ctx.project_root, &loc.path);
        ctx.loaded_spec_files.contains(&absolute) || ctx.in_project_source.is_match(&absolute)
    })
}

/// First in-project frame, else the first frame at all.
pub fn find_failed_frame<'b>(backtrace: &'b [String], ctx: &Ctx) -> Option<&'b str> {
    let mut candidates = backtrace.iter().filter(|frame| !is_internal_frame(frame));
    candidates
        .clone()
        .find(|frame| is_in_project(ctx, frame))
        .or_else(|| candidates.next())
        .map(String::as_str)
}

/// Source line the failure points at, or a sentence explaining why it could
/// not be read.
pub fn read_failed_line(backtrace: &[String], ctx: &Ctx) -> String {
    let Some(location) = find_failed_frame(backtrace, ctx).and_then(parse_frame_location) else {
        tracing::debug!(frames = backtrace.len(), "no usable frame for failed line");
        return NO_MATCHING_FRAME.to_string();
    };
    let path = resolve_frame_path(&ctx.project_root, &location.path);
    ctx.source_locator
        .line_at(&path, location.line)
        .unwrap_or_else(|err| {
            tracing::debug!(path = %path, line = location.line, error = ?err, "failed line unavailable");
            err.to_string()
        })
}
