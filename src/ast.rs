use crate::token::{Token, Value};

macro_rules! enum_structs {
    (#[$attr:meta] $visibility:vis enum $name:ident<$lt:lifetime> { $($field:ident( $($v:vis $f:ident : $t:ty),* )),* $(,)? }) => {
        #[$attr]
        $visibility enum $name<$lt> {
            $($field($field<$lt>),)*
        }
        $(
            #[$attr]
            $visibility struct $field<$lt> {
                $($v $f: $t,)*
            }

            impl<$lt> From<$field<$lt>> for $name<$lt> {
                #[inline]
                fn from(value: $field<$lt>) -> Self {
                    Self::$field(value)
                }
            }
        )*
    };
}

enum_structs! {
    #[derive(Clone, Debug, PartialEq)]
    pub enum Expression<'a> {
        Literal(pub value: Value<'a>),
        Grouping(pub expression: Box<Expression<'a>>),
        Unary(pub operator: Token<'a>, pub right: Box<Expression<'a>>),
        Binary(pub left: Box<Expression<'a>>, pub operator: Token<'a>, pub right: Box<Expression<'a>>),
    }
}

/// One handler per node type. New operations over the tree are new
/// visitors; the node types stay as they are.
pub trait Visitor<'a> {
    type Output;

    fn visit_literal(&mut self, literal: &Literal<'a>) -> Self::Output;
    fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Output;
    fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Output;
    fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Output;
}

impl<'a> Expression<'a> {
    pub fn accept<V: Visitor<'a>>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::Literal(literal) => literal.accept(visitor),
            Expression::Grouping(grouping) => grouping.accept(visitor),
            Expression::Unary(unary) => unary.accept(visitor),
            Expression::Binary(binary) => binary.accept(visitor),
        }
    }
}

impl<'a> Literal<'a> {
    pub fn new(value: Value<'a>) -> Self {
        Self { value }
    }

    #[inline]
    pub fn accept<V: Visitor<'a>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_literal(self)
    }
}

impl<'a> Grouping<'a> {
    pub fn new(expression: Expression<'a>) -> Self {
        Self {
            expression: Box::new(expression),
        }
    }

    #[inline]
    pub fn accept<V: Visitor<'a>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_grouping(self)
    }
}

impl<'a> Unary<'a> {
    pub fn new(operator: Token<'a>, right: Expression<'a>) -> Self {
        Self {
            operator,
            right: Box::new(right),
        }
    }

    #[inline]
    pub fn accept<V: Visitor<'a>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_unary(self)
    }
}

impl<'a> Binary<'a> {
    pub fn new(left: Expression<'a>, operator: Token<'a>, right: Expression<'a>) -> Self {
        Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    #[inline]
    pub fn accept<V: Visitor<'a>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_binary(self)
    }
}
