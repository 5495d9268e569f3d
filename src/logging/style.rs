//! Level-coded console styling

use std::io::IsTerminal;
use std::sync::Arc;

use crossterm::style::{style, Color, Stylize};

use super::console::Stream;

/// Named styles applied to console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    InfoTag,
    WarnTag,
    ErrorTag,
    /// Neutral style for the message body
    Message,
}

impl Style {
    /// Foreground color for this style
    pub fn color(&self) -> Color {
        match self {
            Style::InfoTag | Style::Message => Color::White,
            Style::WarnTag => Color::Yellow,
            Style::ErrorTag => Color::Red,
        }
    }
}

/// Decorates text with a named style
pub trait StyleRenderer: Send + Sync {
    fn render(&self, text: &str, style: Style) -> String;
}

/// Renders styles as ANSI escape sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer;

impl StyleRenderer for AnsiRenderer {
    fn render(&self, text: &str, s: Style) -> String {
        style(text).with(s.color()).to_string()
    }
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl StyleRenderer for PlainRenderer {
    fn render(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// Pick ANSI output when `stream` is a terminal and `NO_COLOR` is unset
pub fn default_renderer(stream: Stream) -> Arc<dyn StyleRenderer> {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let is_terminal = match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    };
    choose_renderer(is_terminal, no_color)
}

fn choose_renderer(is_terminal: bool, no_color: bool) -> Arc<dyn StyleRenderer> {
    if is_terminal && !no_color {
        Arc::new(AnsiRenderer)
    } else {
        Arc::new(PlainRenderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer_is_identity() {
        let renderer = PlainRenderer;
        assert_eq!(renderer.render("[WARN]", Style::WarnTag), "[WARN]");
        assert_eq!(renderer.render("", Style::Message), "");
    }

    #[test]
    fn test_ansi_renderer_keeps_text() {
        let renderer = AnsiRenderer;
        let out = renderer.render("[ERROR]", Style::ErrorTag);
        assert!(out.contains("[ERROR]"));
    }

    #[test]
    fn test_redirected_stream_gets_plain_text() {
        for no_color in [false, true] {
            let renderer = choose_renderer(false, no_color);
            assert_eq!(renderer.render("[ERROR]", Style::ErrorTag), "[ERROR]");
        }
    }

    #[test]
    fn test_no_color_wins_over_terminal() {
        let renderer = choose_renderer(true, true);
        assert_eq!(renderer.render("[WARN]", Style::WarnTag), "[WARN]");
    }

    #[test]
    fn test_style_colors() {
        assert_eq!(Style::InfoTag.color(), Color::White);
        assert_eq!(Style::Message.color(), Color::White);
        assert_eq!(Style::WarnTag.color(), Color::Yellow);
        assert_eq!(Style::ErrorTag.color(), Color::Red);
        assert_ne!(Style::WarnTag.color(), Style::ErrorTag.color());
    }
}
