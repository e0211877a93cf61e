use crate::environment::Environment;
use crate::types::Value;
use crate::{evaluator, reader};
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl From<reader::Error> for Error {
    fn from(e: reader::Error) -> Self {
        Self::Read(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Self::Eval(e)
    }
}

/// Parses `text` and evaluates its forms left to right in `env`, returning the value of the
/// last one. A failing form stops the program, but whatever earlier forms bound stays bound.
pub fn evaluate_program(text: &str, env: &Rc<Environment>) -> Result {
    let program = reader::parse_program(text)?;
    let mut result = Value::Nil;
    for form in program.iter() {
        result = evaluator::eval(form, env)?;
    }
    Ok(result)
}

/// Read, evaluate and print a line: the rendered result, or the rendered error.
pub fn rep(line: &str, env: &Rc<Environment>) -> std::result::Result<String, String> {
    evaluate_program(line, env)
        .map(|value| value.to_string())
        .map_err(|e| format!("Error: {}", e))
}
