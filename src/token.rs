use std::{collections::HashMap, fmt, sync::OnceLock};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    // Literals.
    Identifier,
    String,
    Number,
    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
    Eof,
}

/// A literal value, either carried by a token or held by a literal node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Number(f64),
    String(&'a str),
    Bool(bool),
    Nil,
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::String(string) => f.write_str(string),
            Value::Bool(boolean) => write!(f, "{}", boolean),
            Value::Nil => f.write_str("nil"),
        }
    }
}

/// A classified lexeme. Both the lexeme and any string literal borrow the
/// scanned source, so copying a token never copies text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'a> {
    pub ttype: TokenType,
    pub lexeme: &'a str,
    pub literal: Option<Value<'a>>,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(ttype: TokenType, lexeme: &'a str, literal: Option<Value<'a>>, line: usize) -> Self {
        Self {
            ttype,
            lexeme,
            literal,
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenType::Eof, "", None, line)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.ttype)?;
        if !self.lexeme.is_empty() {
            write!(f, " {}", self.lexeme)?;
        }
        if let Some(literal) = self.literal {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}

/// Maps reserved words to their token type. Built on first use and never
/// mutated afterwards.
pub fn keyword(text: &str) -> Option<TokenType> {
    static KEYWORDS: OnceLock<HashMap<&'static str, TokenType>> = OnceLock::new();
    KEYWORDS
        .get_or_init(|| {
            use TokenType::*;
            [
                ("and", And),
                ("class", Class),
                ("else", Else),
                ("false", False),
                ("for", For),
                ("fun", Fun),
                ("if", If),
                ("nil", Nil),
                ("or", Or),
                ("print", Print),
                ("return", Return),
                ("super", Super),
                ("this", This),
                ("true", True),
                ("var", Var),
                ("while", While),
            ]
            .into_iter()
            .collect()
        })
        .get(text)
        .copied()
}
