use crate::token::{Token, TokenType};
use std::{fmt, slice};

/// Where in the source a diagnostic points.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Location {
    /// Reported by the lexer, which only knows the line.
    Scanner,
    /// The offending token was the end of input.
    End,
    Lexeme(Box<str>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, location: Location, message: impl Into<String>) -> Self {
        Self {
            line,
            location,
            message: message.into(),
        }
    }

    pub fn scanner(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Location::Scanner, message)
    }

    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let location = match token.ttype {
            TokenType::Eof => Location::End,
            _ => Location::Lexeme(token.lexeme.into()),
        };
        Self::new(token.line, location, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {}] Error", self.line)?;
        match &self.location {
            Location::Scanner => {}
            Location::End => f.write_str(" at end")?,
            Location::Lexeme(lexeme) => write!(f, " at '{}'", lexeme)?,
        }
        write!(f, ": {}", self.message)
    }
}

/// Collects everything reported during a scan or parse. A run whose
/// collector `had_error` must not act on its output.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, line: usize, message: impl Into<String>) {
        self.report(Diagnostic::scanner(line, message));
    }

    pub fn error_at(&mut self, token: &Token, message: impl Into<String>) {
        self.report(Diagnostic::at_token(token, message));
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.reported.push(diagnostic);
    }

    #[inline]
    pub fn had_error(&self) -> bool {
        !self.reported.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.reported.iter()
    }

    pub fn clear(&mut self) {
        self.reported.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_errors_have_no_location() {
        let diagnostic = Diagnostic::scanner(3, "Unexpected character.");
        assert_eq!(diagnostic.to_string(), "[line 3] Error: Unexpected character.");
    }

    #[test]
    fn token_errors_name_the_lexeme() {
        let token = Token::new(TokenType::Plus, "+", None, 7);
        let diagnostic = Diagnostic::at_token(&token, "Expect expression.");
        assert_eq!(diagnostic.to_string(), "[line 7] Error at '+': Expect expression.");
    }

    #[test]
    fn eof_errors_point_at_end() {
        let diagnostic = Diagnostic::at_token(&Token::eof(2), "Expect ')' after expression.");
        assert_eq!(
            diagnostic.to_string(),
            "[line 2] Error at end: Expect ')' after expression."
        );
    }

    #[test]
    fn collector_tracks_errors() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());
        diagnostics.error(1, "Unterminated string.");
        diagnostics.error_at(&Token::eof(1), "Expect expression.");
        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.len(), 2);
        diagnostics.clear();
        assert!(!diagnostics.had_error());
    }
}
