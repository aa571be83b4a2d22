//! Double-quoted string literals and their escape sequences

use std::ops::Range;

use super::scanner::{Scanner, Token};

/// A decoded string literal. The span covers the literal in the text it was
/// read from, including both quote characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Range<usize>,
    pub unrecognized: Vec<char>,
    pub terminated: bool,
}

/// Extract every double-quoted literal in the expression, in order,
/// regardless of what surrounds them. A literal still open at the end of
/// the expression is included, marked as not terminated.
pub fn quoted_literals(expr: &str) -> Vec<StringLiteral> {
    let mut literals = Vec::new();
    let mut position = 0;

    while let Some(found) = expr[position..].find('"') {
        let literal = read_literal(expr, position + found);
        position = literal
            .span
            .end;
        literals.push(literal);
    }

    literals
}

/// The literal at the very start of the text, if the text begins with a
/// quote.
pub fn leading_literal(text: &str) -> Option<StringLiteral> {
    if text.starts_with('"') {
        Some(read_literal(text, 0))
    } else {
        None
    }
}

// Decode the literal whose opening quote is at `start`.
fn read_literal(text: &str, start: usize) -> StringLiteral {
    let mut scanner = Scanner::new();
    scanner.step('"');

    let mut value = String::new();
    let mut unrecognized = Vec::new();
    let mut end = None;

    for (i, c) in text[start + 1..].char_indices() {
        let escaped = scanner.escaped();
        if scanner.step(c) == Token::Quote {
            end = Some(start + 1 + i + 1);
            break;
        }

        if escaped {
            match c {
                '\\' => value.push('\\'),
                '"' => value.push('"'),
                'n' => value.push('\n'),
                't' => value.push('\t'),
                other => {
                    value.push('\\');
                    value.push(other);
                    unrecognized.push(other);
                }
            }
        } else if !scanner.escaped() {
            value.push(c);
        }
    }

    if scanner.escaped() {
        value.push('\\');
    }

    StringLiteral {
        value,
        span: start..end.unwrap_or(text.len()),
        unrecognized,
        terminated: end.is_some(),
    }
}

/// Succeeds only if the expression, once trimmed, is exactly one complete
/// string literal. Concatenations, identifiers, method calls, and multiple
/// literals are all "not a literal", which is a normal outcome for the
/// caller to handle rather than an error.
pub fn parse_single_literal(expr: &str) -> Option<StringLiteral> {
    let trimmed = expr.trim();
    if !trimmed.starts_with('"') {
        return None;
    }

    let mut literals = quoted_literals(trimmed);
    if literals.len() != 1 {
        return None;
    }

    let mut literal = literals.remove(0);
    if !literal.terminated || literal.span.end != trimmed.len() {
        return None;
    }

    let leading = expr.len()
        - expr
            .trim_start()
            .len();
    literal.span = literal.span.start + leading..literal.span.end + leading;
    Some(literal)
}

/// The values of every literal in the expression, whatever list syntax
/// surrounds them.
pub fn parse_literal_list(expr: &str) -> Vec<String> {
    quoted_literals(expr)
        .into_iter()
        .map(|literal| literal.value)
        .collect()
}

/// Render a value back into literal form, quotes included.
pub fn encode_literal(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}
