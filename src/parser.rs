use crate::{
    ast::*,
    diagnostic::{Diagnostic, Diagnostics},
    token::{Token, TokenType, Value},
};
use thiserror::Error;

/// A syntax error raised at a grammar point. Grammar functions return it
/// unchanged; only the entry point reports it and recovers.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("parse error at token {token}: {message}")]
pub struct ParseError<'a> {
    pub token: Token<'a>,
    pub message: &'static str,
}

impl From<&ParseError<'_>> for Diagnostic {
    fn from(error: &ParseError<'_>) -> Self {
        Diagnostic::at_token(&error.token, error.message)
    }
}

pub type Result<'a, T> = std::result::Result<T, ParseError<'a>>;

/// Parses a complete token sequence. Returns `None` after reporting the
/// first syntax error; a partial tree is never handed out.
pub fn parse<'a>(tokens: &[Token<'a>], diagnostics: &mut Diagnostics) -> Option<Expression<'a>> {
    Parser::new(tokens).parse(diagnostics)
}

pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
    depth: usize,
}

/// Deepest chain of groupings and unary operators accepted before the parser
/// gives up instead of exhausting the stack.
pub const MAX_DEPTH: usize = 128;

const EQUALITY: &[TokenType] = &[TokenType::BangEqual, TokenType::EqualEqual];
const COMPARISON: &[TokenType] = &[
    TokenType::Greater,
    TokenType::GreaterEqual,
    TokenType::Less,
    TokenType::LessEqual,
];
const TERM: &[TokenType] = &[TokenType::Minus, TokenType::Plus];
const FACTOR: &[TokenType] = &[TokenType::Slash, TokenType::Star];
const UNARY: &[TokenType] = &[TokenType::Bang, TokenType::Minus];

/// Tokens that open a statement-level construct, where recovery may resume.
const STATEMENT_START: &[TokenType] = &[
    TokenType::Class,
    TokenType::Fun,
    TokenType::Var,
    TokenType::For,
    TokenType::If,
    TokenType::While,
    TokenType::Print,
    TokenType::Return,
];

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Option<Expression<'a>> {
        match self.parse_expression() {
            Ok(expression) => Some(expression),
            Err(error) => {
                diagnostics.report(Diagnostic::from(&error));
                self.synchronize();
                None
            }
        }
    }

    pub fn parse_expression(&mut self) -> Result<'a, Expression<'a>> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<'a, Expression<'a>> {
        self.parse_binary(EQUALITY, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<'a, Expression<'a>> {
        self.parse_binary(COMPARISON, Self::parse_term)
    }

    fn parse_term(&mut self) -> Result<'a, Expression<'a>> {
        self.parse_binary(TERM, Self::parse_factor)
    }

    fn parse_factor(&mut self) -> Result<'a, Expression<'a>> {
        self.parse_binary(FACTOR, Self::parse_unary)
    }

    /// Folds `operand (operator operand)*` into a left-leaning tree.
    fn parse_binary(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<'a, Expression<'a>>,
    ) -> Result<'a, Expression<'a>> {
        let mut lhs = operand(self)?;
        while let Some(operator) = self.next_if(operators) {
            let rhs = operand(self)?;
            lhs = Binary::new(lhs, operator, rhs).into();
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<'a, Expression<'a>> {
        match self.next_if(UNARY) {
            Some(operator) => {
                let right = self.nested(Self::parse_unary)?;
                Ok(Unary::new(operator, right).into())
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<'a, Expression<'a>> {
        use TokenType::*;

        let token = self.peek_token();
        let value = match token.ttype {
            False => Value::Bool(false),
            True => Value::Bool(true),
            Nil => Value::Nil,
            Number | String => match token.literal {
                Some(value) => value,
                None => return Err(self.error(token, "Expect literal value.")),
            },
            LeftParen => return self.nested(Self::parse_grouping),
            _ => return Err(self.error(token, "Expect expression.")),
        };
        self.next_token();
        Ok(Literal::new(value).into())
    }

    fn parse_grouping(&mut self) -> Result<'a, Expression<'a>> {
        self.expect(TokenType::LeftParen, "Expect '(' before expression.")?;
        let expression = self.parse_expression()?;
        self.expect(TokenType::RightParen, "Expect ')' after expression.")?;
        Ok(Grouping::new(expression).into())
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<'a, Expression<'a>>,
    ) -> Result<'a, Expression<'a>> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(self.peek_token(), "Too much nesting."));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Discards tokens until a statement boundary so that one real error does
    /// not cascade into many. Always consumes at least one token unless the
    /// input is exhausted.
    pub fn synchronize(&mut self) {
        self.next_token();
        while !self.is_at_end() {
            if self.previous_token().ttype == TokenType::Semicolon {
                return;
            }
            if STATEMENT_START.contains(&self.peek_token().ttype) {
                return;
            }
            self.next_token();
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.peek_token().ttype == TokenType::Eof
    }

    fn peek_token(&self) -> Token<'a> {
        match self.tokens.get(self.current) {
            Some(token) => *token,
            None => Token::eof(self.tokens.last().map_or(1, |token| token.line)),
        }
    }

    fn previous_token(&self) -> Token<'a> {
        match self.current.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => *token,
            None => self.peek_token(),
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        let token = self.peek_token();
        if token.ttype != TokenType::Eof {
            self.current += 1;
        }
        token
    }

    fn next_if(&mut self, ttypes: &[TokenType]) -> Option<Token<'a>> {
        if ttypes.contains(&self.peek_token().ttype) {
            Some(self.next_token())
        } else {
            None
        }
    }

    fn expect(&mut self, ttype: TokenType, message: &'static str) -> Result<'a, Token<'a>> {
        let next = self.peek_token();
        if next.ttype == ttype {
            Ok(self.next_token())
        } else {
            Err(self.error(next, message))
        }
    }

    #[inline]
    fn error(&self, token: Token<'a>, message: &'static str) -> ParseError<'a> {
        ParseError { token, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parser_at_error<'t, 'a>(tokens: &'t [Token<'a>]) -> Parser<'t, 'a> {
        let mut parser = Parser::new(tokens);
        let mut diagnostics = Diagnostics::new();
        assert!(parser.parse(&mut diagnostics).is_none());
        assert_eq!(diagnostics.len(), 1);
        parser
    }

    #[test]
    fn synchronize_stops_after_semicolon() {
        let mut diagnostics = Diagnostics::new();
        let tokens = lexer::scan("+ 1 2 ; 3", &mut diagnostics);
        let parser = parser_at_error(&tokens);
        assert_eq!(parser.previous_token().ttype, TokenType::Semicolon);
        assert_eq!(parser.peek_token().lexeme, "3");
    }

    #[test]
    fn synchronize_stops_before_statement_keyword() {
        let mut diagnostics = Diagnostics::new();
        let tokens = lexer::scan("* 1 2 print 3", &mut diagnostics);
        let parser = parser_at_error(&tokens);
        assert_eq!(parser.peek_token().ttype, TokenType::Print);
    }

    #[test]
    fn synchronize_runs_to_end_without_boundary() {
        let mut diagnostics = Diagnostics::new();
        let tokens = lexer::scan("(1 + 2", &mut diagnostics);
        let parser = parser_at_error(&tokens);
        assert!(parser.is_at_end());
    }

    #[test]
    fn missing_eof_is_tolerated() {
        let mut diagnostics = Diagnostics::new();
        let tokens = [Token::new(TokenType::Minus, "-", None, 1)];
        assert!(parse(&tokens, &mut diagnostics).is_none());
        assert_eq!(
            diagnostics.iter().next().map(ToString::to_string).as_deref(),
            Some("[line 1] Error at end: Expect expression.")
        );
    }

    #[test]
    fn empty_input_is_tolerated() {
        let mut diagnostics = Diagnostics::new();
        assert!(parse(&[], &mut diagnostics).is_none());
        assert!(diagnostics.had_error());
    }
}
