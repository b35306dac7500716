use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    token::{self, Token, TokenType::*, TokenType, Value},
};
use std::{iter::Peekable, str::CharIndices};
use unicode_xid::UnicodeXID;

/// Scans the whole source, reporting lexical errors and carrying on past
/// them. The returned tokens always end with a single `Eof`.
pub fn scan<'a>(source: &'a str, diagnostics: &mut Diagnostics) -> Vec<Token<'a>> {
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    for result in Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => diagnostics.report(diagnostic),
        }
    }
    tokens
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
    line: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            line: 1,
            done: false,
        }
    }

    /// Produces the next token, or a diagnostic for a lexeme that could not
    /// be tokenized. The offending characters are consumed either way.
    pub fn lex(&mut self) -> Result<Token<'a>, Diagnostic> {
        self.skip_trivia();

        let (start, ch) = match self.chars.next() {
            Some(next) => next,
            None => return Ok(Token::eof(self.line)),
        };
        self.start = start;

        let ttype = match ch {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ',' => Comma,
            '.' => Dot,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,
            '/' => Slash,
            '!' => self.either('=', BangEqual, Bang),
            '=' => self.either('=', EqualEqual, Equal),
            '<' => self.either('=', LessEqual, Less),
            '>' => self.either('=', GreaterEqual, Greater),
            '"' => return self.string(),
            '0'..='9' => return Ok(self.number()),
            ch if is_identifier_start(ch) => self.identifier(),
            _ => return Err(Diagnostic::scanner(self.line, "Unexpected character.")),
        };

        Ok(self.token(ttype, None))
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek().map(|&(_, ch)| ch) {
                Some(' ' | '\r' | '\t') => {
                    self.chars.next();
                }
                Some('\n') => {
                    self.line += 1;
                    self.chars.next();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while self.chars.next_if(|&(_, ch)| ch != '\n').is_some() {}
                }
                _ => break,
            }
        }
    }

    fn string(&mut self) -> Result<Token<'a>, Diagnostic> {
        loop {
            match self.chars.next() {
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => continue,
                None => return Err(Diagnostic::scanner(self.line, "Unterminated string.")),
            }
        }
        let end = self.offset();
        let value = &self.source[self.start + 1..end - 1];
        Ok(self.token(String, Some(Value::String(value))))
    }

    fn number(&mut self) -> Token<'a> {
        self.digits();
        let fraction = self.peek_second().map_or(false, |ch| ch.is_ascii_digit());
        if fraction && self.chars.next_if(|&(_, ch)| ch == '.').is_some() {
            self.digits();
        }

        // `digits ('.' digits)?` is always valid float syntax.
        let value = self.lexeme().parse::<f64>().unwrap_or(f64::INFINITY);
        self.token(Number, Some(Value::Number(value)))
    }

    fn identifier(&mut self) -> TokenType {
        while self.chars.next_if(|&(_, ch)| ch.is_xid_continue()).is_some() {}
        token::keyword(self.lexeme()).unwrap_or(Identifier)
    }

    fn digits(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_ascii_digit()).is_some() {}
    }

    #[inline]
    fn either(&mut self, expected: char, matched: TokenType, otherwise: TokenType) -> TokenType {
        match self.chars.next_if(|&(_, ch)| ch == expected) {
            Some(_) => matched,
            None => otherwise,
        }
    }

    fn peek_second(&self) -> Option<char> {
        let mut clone = self.chars.clone();
        clone.next();
        clone.peek().map(|&(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(offset, _)) => offset,
            None => self.source.len(),
        }
    }

    fn lexeme(&mut self) -> &'a str {
        let end = self.offset();
        &self.source[self.start..end]
    }

    fn token(&mut self, ttype: TokenType, literal: Option<Value<'a>>) -> Token<'a> {
        Token::new(ttype, self.lexeme(), literal, self.line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.lex();
        self.done = matches!(result, Ok(Token { ttype: Eof, .. }));
        Some(result)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_xid_start()
}
