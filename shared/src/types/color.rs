//! Span color palette
//!
//! Instrumentation spans carry one of a small fixed set of colors. Tags that
//! are not part of the palette resolve to [`Color::Blue`] instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color of an instrumentation span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Cyan,
}

impl Color {
    /// Every color of the palette, in declaration order
    pub const ALL: [Color; 6] = [
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
    ];

    /// Resolve a color tag, falling back to the default for unknown tags.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "blue" => Color::Blue,
            "green" => Color::Green,
            "red" => Color::Red,
            "yellow" => Color::Yellow,
            "purple" => Color::Purple,
            "cyan" => Color::Cyan,
            _ => Color::default(),
        }
    }

    /// Lowercase tag of the color
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
        }
    }

    /// Opaque ARGB value
    pub fn argb(self) -> u32 {
        0xFF00_0000 | self.rgb()
    }

    /// 24-bit RGB value
    pub fn rgb(self) -> u32 {
        match self {
            Color::Blue => 0x0000FF,
            Color::Green => 0x00FF00,
            Color::Red => 0xFF0000,
            Color::Yellow => 0xFFFF00,
            Color::Purple => 0xFF00FF,
            Color::Cyan => 0x00FFFF,
        }
    }
}

impl From<&str> for Color {
    fn from(tag: &str) -> Self {
        Color::from_tag(tag)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
