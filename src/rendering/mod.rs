//! Styling of report text for the terminal

mod renderer;
mod terminal;

pub use renderer::{Identity, Render, Syntax};
pub use terminal::Terminal;
