#[macro_use]
extern crate log;

pub mod parser;
pub mod table;

pub use parser::{parse, Expr, ExprError};
pub use table::{generate_truth_table, TruthTable, TruthTableBuilder};
