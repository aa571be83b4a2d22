//! Quote- and escape-aware traversal of source text

/// What a single character turned out to be, given the scanner's state at
/// the moment it was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Text,
    Quote,
    Literal,
    Open,
    Close,
    Separator,
}

/// Tracks whether we are inside a double-quoted string, whether the
/// previous character was an escape marker, and how deeply nested we are
/// in parentheses. Parentheses and commas inside a string are reported as
/// Literal and do not affect depth; an escaped quote does not close the
/// string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scanner {
    in_string: bool,
    escaped: bool,
    depth: i32,
}

impl Scanner {
    pub fn new() -> Scanner {
        Scanner::default()
    }

    /// Begin already inside `depth` levels of nesting, as when scanning
    /// from just after an opening parenthesis.
    pub fn nested(depth: i32) -> Scanner {
        Scanner {
            in_string: false,
            escaped: false,
            depth,
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// The previous character was a backslash inside a string, so the
    /// next one is taken literally.
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Outside any string and not nested in parentheses.
    pub fn is_top_level(&self) -> bool {
        !self.in_string && self.depth == 0
    }

    /// Consume one character and update all three pieces of state.
    pub fn step(&mut self, c: char) -> Token {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
                return Token::Quote;
            }
            return Token::Literal;
        }

        match c {
            '"' => {
                self.in_string = true;
                Token::Quote
            }
            '(' => {
                self.depth += 1;
                Token::Open
            }
            // a stray closing parenthesis at depth zero is just text
            ')' if self.depth > 0 => {
                self.depth -= 1;
                Token::Close
            }
            ',' => Token::Separator,
            _ => Token::Text,
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn run(text: &str) -> (Scanner, Vec<Token>) {
        let mut scanner = Scanner::new();
        let tokens = text
            .chars()
            .map(|c| scanner.step(c))
            .collect();
        (scanner, tokens)
    }

    #[test]
    fn plain_text() {
        let (scanner, tokens) = run("ab");
        assert_eq!(tokens, vec![Token::Text, Token::Text]);
        assert!(scanner.is_top_level());
    }

    #[test]
    fn parentheses_nest() {
        let (scanner, tokens) = run("((,)");
        assert_eq!(
            tokens,
            vec![Token::Open, Token::Open, Token::Separator, Token::Close]
        );
        assert_eq!(scanner.depth(), 1);
    }

    #[test]
    fn strings_hide_delimiters() {
        let (scanner, tokens) = run(r#""(,)""#);
        assert_eq!(
            tokens,
            vec![
                Token::Quote,
                Token::Literal,
                Token::Literal,
                Token::Literal,
                Token::Quote
            ]
        );
        assert!(scanner.is_top_level());
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let (scanner, _) = run(r#""a\"b"#);
        assert!(scanner.in_string());

        let (scanner, _) = run(r#""a\\"b"#);
        assert!(!scanner.in_string());
    }

    #[test]
    fn stray_close_is_text() {
        let (scanner, tokens) = run(")");
        assert_eq!(tokens, vec![Token::Text]);
        assert_eq!(scanner.depth(), 0);
    }

    #[test]
    fn starting_nested() {
        let mut scanner = Scanner::nested(1);
        assert_eq!(scanner.step(')'), Token::Close);
        assert!(scanner.is_top_level());
    }
}
