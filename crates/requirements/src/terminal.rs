//! Terminal capability detection
//!
//! The diff renderer decorates output with ANSI colors when the terminal
//! supports them. Detection runs once per process and is cached.

use std::io::IsTerminal;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width assumed when `COLUMNS` is unset or unparsable.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// The color capability of the terminal that failure messages are printed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalEncoding {
    /// No color support; diffs use text markers.
    #[default]
    None,
    /// The 16 basic ANSI colors.
    Xterm16Colors,
    /// The 256-color xterm palette.
    Xterm256Colors,
    /// 24-bit true color.
    Xterm16MColors,
}

impl TerminalEncoding {
    /// Returns `true` for every encoding that supports color.
    pub const fn supports_color(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Detects the encoding of standard output.
    ///
    /// The result is computed on first use and cached for the lifetime of
    /// the process.
    pub fn detect() -> Self {
        static DETECTED: OnceLock<TerminalEncoding> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let encoding = Self::from_environment(
                std::env::var("NO_COLOR").ok().as_deref(),
                std::env::var("COLORTERM").ok().as_deref(),
                std::env::var("TERM").ok().as_deref(),
                std::io::stdout().is_terminal(),
            );
            debug!(?encoding, "detected terminal encoding");
            encoding
        })
    }

    /// Derives an encoding from environment values.
    ///
    /// `NO_COLOR` (non-empty) and a non-terminal output disable color.
    pub fn from_environment(
        no_color: Option<&str>,
        colorterm: Option<&str>,
        term: Option<&str>,
        is_terminal: bool,
    ) -> Self {
        if no_color.is_some_and(|value| !value.is_empty()) || !is_terminal {
            return Self::None;
        }
        if colorterm.is_some_and(|value| {
            value.eq_ignore_ascii_case("truecolor") || value.eq_ignore_ascii_case("24bit")
        }) {
            return Self::Xterm16MColors;
        }
        match term {
            Some(term) if term.contains("256color") => Self::Xterm256Colors,
            Some(term) if !term.is_empty() && term != "dumb" => Self::Xterm16Colors,
            _ => Self::None,
        }
    }
}

/// Detects the terminal width from `COLUMNS`.
///
/// Cached like [`TerminalEncoding::detect`].
pub fn detect_terminal_width() -> usize {
    static DETECTED: OnceLock<usize> = OnceLock::new();
    *DETECTED.get_or_init(|| {
        let width = width_from_environment(std::env::var("COLUMNS").ok().as_deref());
        debug!(width, "detected terminal width");
        width
    })
}

fn width_from_environment(columns: Option<&str>) -> usize {
    columns
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}
