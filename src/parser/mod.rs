pub mod ast;
pub mod error;
pub mod expr;
pub mod lex;

pub use ast::{Connective, Node, NodeId, Tree};
pub use error::ExprError;
pub use expr::{Expr, Parser, MAX_RECURSION};
pub use lex::{lex, Lexer, Symbol, Token};

pub fn parse(text: &str) -> Result<Expr, ExprError> {
    Expr::from_string(text)
}
