//! Renderer for colourizing report output

use owo_colors::OwoColorize;

use super::renderer::{Render, Syntax};

/// Embellish fragments with ANSI escapes for display in a terminal.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Passed => content // #4e9a06 (green) bold
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .bold()
                .to_string(),
            Syntax::Failed => content
                .bright_red()
                .bold()
                .to_string(),
            Syntax::Bullet => content // #999999 (grey)
                .color(owo_colors::Rgb(0x99, 0x99, 0x99))
                .bold()
                .to_string(),
            Syntax::Locator => content // #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Warning => content // #f57900 (orange) bold
                .color(owo_colors::Rgb(0xf5, 0x79, 0x00))
                .bold()
                .to_string(),
            Syntax::Count => content
                .bright_white()
                .bold()
                .to_string(),
        }
    }
}
