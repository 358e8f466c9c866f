//! Process-wide defaults
//!
//! Settings are read when a [`Validators`](crate::Validators) factory is
//! created. Validators that already exist are not affected by later
//! changes.

use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::terminal::{TerminalEncoding, detect_terminal_width};

/// A snapshot of the process-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Whether `assert_that` evaluates its closure.
    pub assertions_enabled: bool,
    /// Whether failure messages may include a diff.
    pub diff_enabled: bool,
    /// The encoding diffs are rendered for.
    pub terminal_encoding: TerminalEncoding,
    /// The width of the terminal, for callers that wrap messages.
    pub terminal_width: usize,
}

impl GlobalSettings {
    fn detect() -> Self {
        Self {
            assertions_enabled: cfg!(debug_assertions),
            diff_enabled: true,
            terminal_encoding: TerminalEncoding::detect(),
            terminal_width: detect_terminal_width(),
        }
    }
}

static SETTINGS: LazyLock<RwLock<GlobalSettings>> =
    LazyLock::new(|| RwLock::new(GlobalSettings::detect()));

/// Accessors for the process-wide settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalConfiguration;

impl GlobalConfiguration {
    /// Returns a copy of the current settings.
    pub fn snapshot() -> GlobalSettings {
        *SETTINGS.read()
    }

    /// Returns `true` if `assert_that` evaluates its closure.
    pub fn assertions_enabled() -> bool {
        SETTINGS.read().assertions_enabled
    }

    /// Enables or disables assertions.
    pub fn set_assertions_enabled(enabled: bool) {
        SETTINGS.write().assertions_enabled = enabled;
    }

    /// Returns `true` if failure messages may include a diff.
    pub fn diff_enabled() -> bool {
        SETTINGS.read().diff_enabled
    }

    /// Enables or disables diffs.
    pub fn set_diff_enabled(enabled: bool) {
        SETTINGS.write().diff_enabled = enabled;
    }

    /// Returns the encoding diffs are rendered for.
    pub fn terminal_encoding() -> TerminalEncoding {
        SETTINGS.read().terminal_encoding
    }

    /// Overrides the detected terminal encoding.
    pub fn set_terminal_encoding(encoding: TerminalEncoding) {
        debug!(?encoding, "terminal encoding overridden");
        SETTINGS.write().terminal_encoding = encoding;
    }

    /// Drops any override and uses the detected terminal encoding.
    pub fn use_best_terminal_encoding() {
        Self::set_terminal_encoding(TerminalEncoding::detect());
    }

    /// Returns the terminal width.
    pub fn terminal_width() -> usize {
        SETTINGS.read().terminal_width
    }

    /// Overrides the detected terminal width.
    pub fn set_terminal_width(width: usize) {
        SETTINGS.write().terminal_width = width;
    }

    /// Drops any override and uses the detected terminal width.
    pub fn use_best_terminal_width() {
        Self::set_terminal_width(detect_terminal_width());
    }
}
