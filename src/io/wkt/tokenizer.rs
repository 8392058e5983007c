//! Tokens for the WKT grammar.

use std::fmt;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// A run of letters, digits, `-`, `+` and `.`.
    Word(&'a str),
    /// One of `( ) , = ;` or any other single character.
    Char(char),
    Eof,
}

impl Token<'_> {
    /// True for a word matching `keyword` in any case.
    pub(crate) fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "word '{w}'"),
            Token::Char(c) => write!(f, "'{c}'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.')
}

/// Splits WKT text into tokens. Whitespace and `#` comments running to the end
/// of the line are skipped. Copying the tokenizer snapshots its position, so
/// lookahead never consumes input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0, line: 1 }
    }

    /// One-based line reached so far.
    #[inline] pub(crate) fn line(&self) -> usize { self.line }

    fn skip_blank(&mut self) {
        let mut chars = self.text[self.pos..].char_indices();
        let mut in_comment = false;
        while let Some((offset, c)) = chars.next() {
            match c {
                '\n' => { self.line += 1; in_comment = false; }
                '#' => in_comment = true,
                _ if in_comment || c.is_whitespace() => {}
                _ => { self.pos += offset; return; }
            }
        }
        self.pos = self.text.len();
    }

    pub(crate) fn next_token(&mut self) -> Token<'a> {
        self.skip_blank();
        let rest = &self.text[self.pos..];
        let Some(first) = rest.chars().next() else { return Token::Eof };
        if is_word_char(first) {
            let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
            self.pos += len;
            Token::Word(&rest[..len])
        } else {
            self.pos += first.len_utf8();
            Token::Char(first)
        }
    }

    /// The next token, left unconsumed.
    pub(crate) fn peek(&self) -> Token<'a> {
        let mut ahead = *self;
        ahead.next_token()
    }

    /// True once only whitespace and comments remain.
    pub(crate) fn at_end(&self) -> bool {
        self.peek() == Token::Eof
    }

    /// Failure describing the token actually found, tagged with its line.
    pub(crate) fn unexpected(&self, expected: &str, found: Token<'_>) -> ParseError {
        ParseError::expected(expected, found.to_string()).located(format_args!("line {}", self.line))
    }

    /// Consume a specific character or fail.
    pub(crate) fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        match self.next_token() {
            Token::Char(c) if c == expected => Ok(()),
            other => Err(self.unexpected(&format!("'{expected}'"), other)),
        }
    }

    /// Consume a word or fail.
    pub(crate) fn expect_word(&mut self, expected: &str) -> Result<&'a str, ParseError> {
        match self.next_token() {
            Token::Word(w) => Ok(w),
            other => Err(self.unexpected(expected, other)),
        }
    }

    /// Consume a number. `NaN`, `Inf` and `-Inf` are accepted in any case.
    pub(crate) fn expect_number(&mut self) -> Result<f64, ParseError> {
        let word = self.expect_word("a number")?;
        word.parse::<f64>().map_err(|_| self.unexpected("a number", Token::Word(word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(text);
        let mut out = Vec::new();
        loop {
            let token = tokenizer.next_token();
            out.push(token);
            if token == Token::Eof {
                return out;
            }
        }
    }

    #[test]
    fn splits_words_and_delimiters() {
        assert_eq!(
            tokens("SRID=4326;POINT(1.5 -2e3)"),
            vec![
                Token::Word("SRID"), Token::Char('='), Token::Word("4326"), Token::Char(';'),
                Token::Word("POINT"), Token::Char('('), Token::Word("1.5"), Token::Word("-2e3"),
                Token::Char(')'), Token::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments_and_counts_lines() {
        let mut tokenizer = Tokenizer::new("# header\n  POINT # trailing\n\n(");
        assert_eq!(tokenizer.next_token(), Token::Word("POINT"));
        assert_eq!(tokenizer.line(), 2);
        assert_eq!(tokenizer.next_token(), Token::Char('('));
        assert_eq!(tokenizer.line(), 4);
        assert!(tokenizer.at_end());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new("EMPTY");
        assert!(tokenizer.peek().is_word("empty"));
        assert!(tokenizer.next_token().is_word("EMPTY"));
        assert_eq!(tokenizer.next_token(), Token::Eof);
    }

    #[test]
    fn numbers_include_special_values() {
        let mut tokenizer = Tokenizer::new("NaN inf -Inf 1e-3 x");
        assert!(tokenizer.expect_number().unwrap().is_nan());
        assert_eq!(tokenizer.expect_number().unwrap(), f64::INFINITY);
        assert_eq!(tokenizer.expect_number().unwrap(), f64::NEG_INFINITY);
        assert_eq!(tokenizer.expect_number().unwrap(), 0.001);
        let err = tokenizer.expect_number().unwrap_err();
        assert_eq!(err.message(), "expected a number but found word 'x' (line 1)");
    }
}
