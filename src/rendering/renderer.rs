/// Kinds of report content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Syntax {
    Neutral, // default
    Passed,
    Failed,
    Bullet,
    Locator,
    Warning,
    Count,
}

/// Trait for different rendering backends (the no-op no-markup one, and
/// ANSI escapes for terminal colouring)
pub trait Render {
    /// Apply styling to content with the specified syntax type
    fn style(&self, syntax: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Render for Identity {
    fn style(&self, _syntax: Syntax, content: &str) -> String {
        content.to_string()
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn identity_is_plain() {
        assert_eq!(Identity.style(Syntax::Failed, "Validation failed:"), "Validation failed:");
        assert_eq!(Identity.style(Syntax::Bullet, "-"), "-");
    }
}
