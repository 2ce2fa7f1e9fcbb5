use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::config::{ColorMode, Palette};

/// Semantic style keys; the palette decides the concrete color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Style {
    Failure,
    Pending,
    Fixed,
    Detail,
    Default,
    Success,
}

pub trait Styler {
    fn wrap(&self, text: &str, style: Style) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullStyler;

impl Styler for NullStyler {
    fn wrap(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnsiStyler {
    palette: Palette,
}

impl AnsiStyler {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Styler for AnsiStyler {
    fn wrap(&self, text: &str, style: Style) -> String {
        self.palette.color_for(style).paint(text)
    }
}

pub fn styler_for(mode: ColorMode, palette: Palette) -> Box<dyn Styler> {
    if use_color(mode) {
        Box::new(AnsiStyler::new(palette))
    } else {
        Box::new(NullStyler)
    }
}

pub fn use_color(mode: ColorMode) -> bool {
    color_for_mode(mode, |name| std::env::var(name).ok())
        .unwrap_or_else(|| std::io::stdout().is_terminal())
}

/// Decision for `mode` given an environment lookup; `None` leaves it to
/// whether stdout is a terminal.
///
/// `auto` honors `NO_COLOR`, `CLICOLOR=0`, `FORCE_COLOR` and `TERM=dumb`, in
/// that order of precedence.
pub fn color_for_mode(mode: ColorMode, env: impl Fn(&str) -> Option<String>) -> Option<bool> {
    match mode {
        ColorMode::Always => return Some(true),
        ColorMode::Never => return Some(false),
        ColorMode::Auto => {}
    }
    let var = |name: &str| env(name).map(|value| value.trim().to_string());

    if var("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        return Some(false);
    }
    if var("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    let forced = var("FORCE_COLOR")
        .filter(|value| !value.is_empty())
        .map(|value| value != "0");
    match forced {
        Some(forced) => Some(forced),
        None if var("TERM").as_deref() == Some("dumb") => Some(false),
        None => None,
    }
}
