use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FaultlineError;
use crate::format::ansi;
use crate::format::styler::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    Bold,
}

impl Color {
    pub fn paint(self, text: &str) -> String {
        match self {
            Color::Black => ansi::black(text),
            Color::Red => ansi::red(text),
            Color::Green => ansi::green(text),
            Color::Yellow => ansi::yellow(text),
            Color::Blue => ansi::blue(text),
            Color::Magenta => ansi::magenta(text),
            Color::Cyan => ansi::cyan(text),
            Color::White => ansi::white(text),
            Color::Gray => ansi::gray(text),
            Color::Bold => ansi::bold(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub failure: Color,
    pub pending: Color,
    pub fixed: Color,
    pub detail: Color,
    pub default: Color,
    pub success: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            failure: Color::Red,
            pending: Color::Yellow,
            fixed: Color::Blue,
            detail: Color::Cyan,
            default: Color::White,
            success: Color::Green,
        }
    }
}

impl Palette {
    pub fn color_for(&self, style: Style) -> Color {
        match style {
            Style::Failure => self.failure,
            Style::Pending => self.pending,
            Style::Fixed => self.fixed,
            Style::Detail => self.detail,
            Style::Default => self.default,
            Style::Success => self.success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

pub const DEFAULT_PROJECT_SOURCE_DIRS: [&str; 5] = ["src", "tests", "benches", "spec", "lib"];

pub const DEFAULT_BACKTRACE_EXCLUSION_PATTERNS: [&str; 5] = [
    r"^<internal:",
    r"/\.cargo/registry/",
    r"/rustc/[0-9a-f]+/",
    r"/library/(std|core|alloc)/src/",
    r"/faultline/src/",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub palette: Palette,
    pub color_mode: ColorMode,
    pub project_root: Option<PathBuf>,
    pub project_source_dirs: Vec<String>,
    pub in_project_source_dir_regex: Option<String>,
    pub loaded_spec_files: Vec<String>,
    pub full_cause_backtrace: bool,
    pub full_backtrace: bool,
    pub backtrace_exclusion_patterns: Vec<String>,
    pub backtrace_inclusion_patterns: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            color_mode: ColorMode::default(),
            project_root: None,
            project_source_dirs: DEFAULT_PROJECT_SOURCE_DIRS
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
            in_project_source_dir_regex: None,
            loaded_spec_files: vec![],
            full_cause_backtrace: false,
            full_backtrace: false,
            backtrace_exclusion_patterns: DEFAULT_BACKTRACE_EXCLUSION_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            backtrace_inclusion_patterns: vec![],
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, FaultlineError> {
        let text = fs::read_to_string(path).map_err(|source| FaultlineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|err| FaultlineError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
