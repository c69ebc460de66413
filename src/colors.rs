//! Color utilities for request log lines.

use owo_colors::{AnsiColors, DynColors, OwoColorize, Style};

/// Twelve distinct ANSI colors for request ID coloring, readable on both
/// light and dark terminal backgrounds.
const PALETTE: [AnsiColors; 12] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::BrightRed,
    AnsiColors::BrightGreen,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightMagenta,
    AnsiColors::BrightCyan,
];

/// Stable mapping from a request ID to a palette color. The same ID keeps
/// its color for the lifetime of the process, so the two log lines of one
/// exchange are visually paired in the scrollback.
fn color_for_id(id: &str) -> AnsiColors {
    let hash = id
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(131).wrapping_add(b as usize));
    PALETTE[hash % PALETTE.len()]
}

/// Wraps a request ID in brackets and paints it with its stable color.
pub fn colored_id(id: &str) -> String {
    let style = Style::new().color(DynColors::Ansi(color_for_id(id)));
    format!("[{}]", id).style(style).to_string()
}
