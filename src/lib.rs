pub mod ast;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use diagnostic::{Diagnostic, Diagnostics};
pub use lexer::scan;
pub use parser::parse;
