mod ast;
mod condition;
mod context;
mod evaluation_report;
mod value;
#[cfg(feature = "serde")]
mod wire;

pub use ast::{Ast, LogicalOp, Node};
pub use condition::{Comparator, Condition};
pub use context::Context;
pub use evaluation_report::EvaluationReport;
pub use value::Value;
