//! Locate call-like expressions and recover their argument text

use super::literal::{leading_literal, StringLiteral};
use super::scanner::{Scanner, Token};

/// Which call-like expression to look for. A constructor marker matches
/// `new Name(`; a plain call marker matches `name(` (including method calls
/// such as `handler.name(`). Whitespace between the keyword, the name, and
/// the opening parenthesis is tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMarker<'m> {
    name: &'m str,
    constructor: bool,
}

impl<'m> CallMarker<'m> {
    pub fn constructor(name: &'m str) -> CallMarker<'m> {
        CallMarker {
            name,
            constructor: true,
        }
    }

    pub fn call(name: &'m str) -> CallMarker<'m> {
        CallMarker {
            name,
            constructor: false,
        }
    }

    pub fn name(&self) -> &'m str {
        self.name
    }

    // Check what precedes an occurrence of the name starting at `start`.
    fn preceded_correctly(&self, source: &str, start: usize) -> bool {
        let before = &source[..start];

        if self.constructor {
            let trimmed = before.trim_end();
            if trimmed.len() == before.len() {
                return false;
            }
            match trimmed.strip_suffix("new") {
                Some(rest) => !ends_with_identifier(rest),
                None => false,
            }
        } else {
            !ends_with_identifier(before)
        }
    }
}

/// The raw argument text of one call, without the enclosing parentheses,
/// and the byte offset in the source where it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'i> {
    pub text: &'i str,
    pub offset: usize,
}

/// Lazy sequence of argument blocks, in source order.
#[derive(Debug, Clone)]
pub struct Blocks<'i, 'm> {
    source: &'i str,
    marker: CallMarker<'m>,
    position: usize,
}

/// Find every occurrence of the marker in the source text. An occurrence
/// whose parentheses never balance before the end of input is dropped and
/// ends the sequence.
pub fn extract_blocks<'i, 'm>(source: &'i str, marker: CallMarker<'m>) -> Blocks<'i, 'm> {
    Blocks {
        source,
        marker,
        position: 0,
    }
}

impl<'i, 'm> Iterator for Blocks<'i, 'm> {
    type Item = Block<'i>;

    fn next(&mut self) -> Option<Block<'i>> {
        let name = self
            .marker
            .name;
        if name.is_empty() {
            return None;
        }

        loop {
            let found = self.source[self.position..].find(name)?;
            let start = self.position + found;
            let end = start + name.len();
            self.position = end;

            if !self
                .marker
                .preceded_correctly(self.source, start)
            {
                continue;
            }

            let after = &self.source[end..];
            let gap = after.len()
                - after
                    .trim_start()
                    .len();
            if !after[gap..].starts_with('(') {
                continue;
            }

            let body = end + gap + 1;
            match balanced_end(self.source, body) {
                Some(close) => {
                    self.position = close + 1;
                    return Some(Block {
                        text: &self.source[body..close],
                        offset: body,
                    });
                }
                None => {
                    self.position = self
                        .source
                        .len();
                    return None;
                }
            }
        }
    }
}

/// Starting just inside an opening parenthesis, return the byte offset of
/// the parenthesis that closes it.
pub fn balanced_end(source: &str, body: usize) -> Option<usize> {
    let mut scanner = Scanner::nested(1);

    for (i, c) in source[body..].char_indices() {
        if scanner.step(c) == Token::Close && scanner.depth() == 0 {
            return Some(body + i);
        }
    }
    None
}

/// Every string literal that directly follows the given keyword and some
/// whitespace, as the labels of `case "name":` arms do. Occurrences of the
/// keyword that are part of a longer word, or are not followed by a
/// literal, are skipped.
pub fn keyword_literals(source: &str, keyword: &str) -> Vec<StringLiteral> {
    let mut literals = Vec::new();
    if keyword.is_empty() {
        return literals;
    }

    let mut position = 0;
    while let Some(found) = source[position..].find(keyword) {
        let start = position + found;
        let end = start + keyword.len();
        position = end;

        if ends_with_identifier(&source[..start]) {
            continue;
        }

        let after = &source[end..];
        let rest = after.trim_start();
        if rest.len() == after.len() {
            continue;
        }

        if let Some(mut literal) = leading_literal(rest) {
            if !literal.terminated {
                continue;
            }
            let offset = source.len() - rest.len();
            literal.span = literal.span.start + offset..literal.span.end + offset;
            position = literal
                .span
                .end;
            literals.push(literal);
        }
    }

    literals
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn ends_with_identifier(text: &str) -> bool {
    text.chars()
        .next_back()
        .is_some_and(is_identifier_char)
}
