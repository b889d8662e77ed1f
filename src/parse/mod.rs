mod error;
mod grammar;
mod parser;

pub use error::{ConditionError, ParseError};
pub(crate) use grammar::split_condition;
pub(crate) use parser::build_ast;
