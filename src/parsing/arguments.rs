//! Split an argument list into its top-level arguments

use super::scanner::{Scanner, Token};

/// Split balanced argument text at every comma that is neither inside a
/// string literal nor nested in parentheses. Each argument is trimmed of
/// surrounding whitespace. Empty (or all-whitespace) input has no
/// arguments; otherwise the result always has one more element than there
/// are top-level commas, so a trailing comma yields a final empty argument.
///
/// This never fails. Malformed input is simply segmented differently, and
/// it is up to the caller to compare the count against the arity it
/// expects.
pub fn split_arguments(text: &str) -> Vec<&str> {
    if text
        .trim()
        .is_empty()
    {
        return Vec::new();
    }

    let mut scanner = Scanner::new();
    let mut arguments = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        let token = scanner.step(c);
        if token == Token::Separator && scanner.depth() == 0 {
            arguments.push(text[start..i].trim());
            start = i + 1;
        }
    }
    arguments.push(text[start..].trim());

    arguments
}
