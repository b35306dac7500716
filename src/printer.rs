use crate::ast::*;

/// Renders a tree in fully parenthesized prefix notation, e.g.
/// `(* (- 123) (group 45.67))`.
#[derive(Default)]
pub struct AstPrinter {
    buffer: String,
}

pub fn print(expression: &Expression) -> String {
    let mut printer = AstPrinter::default();
    expression.accept(&mut printer);
    printer.buffer
}

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, expressions: &[&Expression]) {
        self.buffer.push('(');
        self.buffer.push_str(name);
        for expression in expressions {
            self.buffer.push(' ');
            expression.accept(self);
        }
        self.buffer.push(')');
    }
}

impl<'a> Visitor<'a> for AstPrinter {
    type Output = ();

    fn visit_literal(&mut self, literal: &Literal<'a>) {
        self.buffer.push_str(&literal.value.to_string());
    }

    fn visit_grouping(&mut self, grouping: &Grouping<'a>) {
        self.parenthesize("group", &[&*grouping.expression]);
    }

    fn visit_unary(&mut self, unary: &Unary<'a>) {
        self.parenthesize(unary.operator.lexeme, &[&*unary.right]);
    }

    fn visit_binary(&mut self, binary: &Binary<'a>) {
        self.parenthesize(binary.operator.lexeme, &[&*binary.left, &*binary.right]);
    }
}
