//! A small S-expression evaluator. Programs and data share one representation: a cons
//! list of tagged values. Every list form is evaluated the same way, by looking up its
//! head symbol and handing the callable found there the unevaluated rest of the form.

pub mod cmdline;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod list;
pub mod printer;
pub mod reader;
pub mod tokens;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod core;
mod special_forms;

pub use environment::Environment;
pub use interpreter::evaluate_program;
pub use list::List;
pub use types::Value;
