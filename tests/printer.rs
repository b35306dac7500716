use lox::{
    ast::*,
    printer,
    token::{Token, TokenType, Value},
};

#[test]
fn prefix_notation() {
    let expression: Expression = Binary::new(
        Unary::new(
            Token::new(TokenType::Minus, "-", None, 1),
            Literal::new(Value::Number(123.0)).into(),
        )
        .into(),
        Token::new(TokenType::Star, "*", None, 1),
        Grouping::new(Literal::new(Value::Number(45.67)).into()).into(),
    )
    .into();
    assert_eq!(printer::print(&expression), "(* (- 123) (group 45.67))");
}

#[test]
fn literal_values() {
    let print = |value| printer::print(&Literal::new(value).into());
    assert_eq!(print(Value::Number(1.5)), "1.5");
    assert_eq!(print(Value::String("two words")), "two words");
    assert_eq!(print(Value::Bool(false)), "false");
    assert_eq!(print(Value::Nil), "nil");
}

/// Counts nodes without touching the node definitions.
struct NodeCounter;

impl<'a> Visitor<'a> for NodeCounter {
    type Output = usize;

    fn visit_literal(&mut self, _: &Literal<'a>) -> usize {
        1
    }

    fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> usize {
        1 + grouping.expression.accept(self)
    }

    fn visit_unary(&mut self, unary: &Unary<'a>) -> usize {
        1 + unary.right.accept(self)
    }

    fn visit_binary(&mut self, binary: &Binary<'a>) -> usize {
        1 + binary.left.accept(self) + binary.right.accept(self)
    }
}

#[test]
fn custom_visitor() {
    let mut diagnostics = lox::Diagnostics::new();
    let tokens = lox::scan("-(1 + 2) * !nil", &mut diagnostics);
    let expression = lox::parse(&tokens, &mut diagnostics).expect("Error parsing expression");
    assert_eq!(expression.accept(&mut NodeCounter), 8);
}
