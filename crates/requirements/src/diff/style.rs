//! How diff rows are decorated
//!
//! [`TextStyle`] marks changes on a separate diff line; [`ColorStyle`]
//! paints the changed text with ANSI colors instead.

use nu_ansi_term::{Color, Style};

use crate::terminal::TerminalEncoding;

/// Decoration strategy of a [`DiffWriter`](super::DiffWriter).
pub trait DiffStyle {
    /// The character used to pad a row so that columns line up.
    fn padding_marker(&self) -> char;

    /// Returns `true` if the writer emits a marker line per row.
    fn has_diff_line(&self) -> bool;

    /// Decorates text present in both values.
    fn equal(&self, text: &str) -> String;

    /// Decorates text present only in the actual value.
    fn deleted(&self, text: &str) -> String;

    /// Decorates text present only in the expected value.
    fn inserted(&self, text: &str) -> String;

    /// Decorates `width` columns of padding.
    fn padding(&self, width: usize) -> String;
}

// ============================================================================
// TEXT
// ============================================================================

/// Plain-text rendering with a `-`/`+` marker line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle;

impl DiffStyle for TextStyle {
    fn padding_marker(&self) -> char {
        ' '
    }

    fn has_diff_line(&self) -> bool {
        true
    }

    fn equal(&self, text: &str) -> String {
        text.to_owned()
    }

    fn deleted(&self, text: &str) -> String {
        text.to_owned()
    }

    fn inserted(&self, text: &str) -> String {
        text.to_owned()
    }

    fn padding(&self, width: usize) -> String {
        " ".repeat(width)
    }
}

// ============================================================================
// COLOR
// ============================================================================

/// ANSI rendering for a color-capable terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStyle {
    deleted: Style,
    inserted: Style,
    padding: Style,
}

impl ColorStyle {
    /// Builds the palette for `encoding`.
    ///
    /// [`TerminalEncoding::None`] is treated as the 16-color palette.
    pub fn new(encoding: TerminalEncoding) -> Self {
        match encoding {
            TerminalEncoding::None | TerminalEncoding::Xterm16Colors => Self {
                deleted: Style::new().fg(Color::White).on(Color::Red),
                inserted: Style::new().fg(Color::Black).on(Color::Green),
                padding: Style::new().dimmed(),
            },
            TerminalEncoding::Xterm256Colors => Self {
                deleted: Style::new().fg(Color::Fixed(15)).on(Color::Fixed(124)),
                inserted: Style::new().fg(Color::Fixed(16)).on(Color::Fixed(34)),
                padding: Style::new().fg(Color::Fixed(244)),
            },
            TerminalEncoding::Xterm16MColors => Self {
                deleted: Style::new().fg(Color::Rgb(255, 255, 255)).on(Color::Rgb(192, 0, 0)),
                inserted: Style::new().fg(Color::Rgb(0, 0, 0)).on(Color::Rgb(0, 176, 0)),
                padding: Style::new().fg(Color::Rgb(128, 128, 128)),
            },
        }
    }
}

impl DiffStyle for ColorStyle {
    fn padding_marker(&self) -> char {
        '/'
    }

    fn has_diff_line(&self) -> bool {
        false
    }

    fn equal(&self, text: &str) -> String {
        text.to_owned()
    }

    fn deleted(&self, text: &str) -> String {
        self.deleted.paint(text).to_string()
    }

    fn inserted(&self, text: &str) -> String {
        self.inserted.paint(text).to_string()
    }

    fn padding(&self, width: usize) -> String {
        self.padding.paint("/".repeat(width)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_is_undecorated() {
        assert_eq!(TextStyle.deleted("ab"), "ab");
        assert_eq!(TextStyle.padding(3), "   ");
        assert!(TextStyle.has_diff_line());
    }

    #[test]
    fn test_color_style_paints_changes() {
        let style = ColorStyle::new(TerminalEncoding::Xterm16Colors);
        let deleted = style.deleted("ab");
        assert!(deleted.starts_with('\u{1b}'));
        assert!(deleted.contains("ab"));
        assert_eq!(style.equal("ab"), "ab");
        assert!(!style.has_diff_line());
        assert_eq!(style.padding_marker(), '/');
    }

    #[test]
    fn test_palettes_differ_per_encoding() {
        let basic = ColorStyle::new(TerminalEncoding::Xterm16Colors).inserted("x");
        let extended = ColorStyle::new(TerminalEncoding::Xterm256Colors).inserted("x");
        let true_color = ColorStyle::new(TerminalEncoding::Xterm16MColors).inserted("x");
        assert_ne!(basic, extended);
        assert_ne!(extended, true_color);
    }
}
