use crate::environment::{Environment, UnboundSymbol};
use crate::list::{InvariantViolation, List};
use crate::types::{Arity, BadArgCount, Lambda, NativeProcedure, TypeMismatch, Value};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    TypeMismatch(TypeMismatch),
    UnboundSymbol(UnboundSymbol),
    Arity(BadArgCount),
    NotCallable(String),
    StructuralInvariantViolation(InvariantViolation),
    DivideByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::UnboundSymbol(e) => write!(f, "{}", e),
            Error::Arity(e) => write!(f, "{}", e),
            Error::NotCallable(repr) => write!(f, "{} is not callable", repr),
            Error::StructuralInvariantViolation(e) => write!(f, "internal error: {}", e),
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<UnboundSymbol> for Error {
    fn from(e: UnboundSymbol) -> Self {
        Self::UnboundSymbol(e)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::Arity(e)
    }
}

impl From<InvariantViolation> for Error {
    fn from(e: InvariantViolation) -> Self {
        Self::StructuralInvariantViolation(e)
    }
}

pub fn eval(value: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("eval {}", value);
    match value {
        Value::Nil | Value::Integer(_) => Ok(value.clone()),
        Value::Text(name) => Ok(env.fetch(name)?),
        Value::List(list) => match list.head() {
            None => Ok(value.clone()),
            Some(head) => {
                // The head is looked up, never evaluated: the callable decides what to do
                // with the rest of the form.
                let callable = env.fetch(head.as_text()?)?;
                let no_args = List::new();
                apply(&callable, env, list.tail().unwrap_or(&no_args))
            }
        },
        Value::Lambda(lambda) => eval(&lambda.body, &lambda.captured),
        Value::Native(func) => call_native(func, env, &List::new()),
    }
}

pub fn apply(callable: &Value, env: &Rc<Environment>, args: &List) -> Result {
    match callable {
        Value::Native(func) => call_native(func, env, args),
        Value::Lambda(lambda) => call_lambda(lambda, args),
        _ => Err(Error::NotCallable(callable.to_string())),
    }
}

pub(crate) fn pretty_print_args(args: &List) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args.iter().join(""),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_native(func: &NativeProcedure, env: &Rc<Environment>, args: &List) -> Result {
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(env, args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

// Arguments are bound exactly as written, like a native receives them; the body can force
// one with `eval`. Surplus arguments are ignored.
fn call_lambda(lambda: &Lambda, args: &List) -> Result {
    log::trace!("Call {:?} with {}", lambda, pretty_print_args(args));
    Arity::at_least(lambda.parameters.len()).validate_for(args.len(), "lambda")?;
    let local = Environment::spawn_from(&lambda.captured);
    for (name, arg) in lambda.parameters.iter().zip(args) {
        local.bind(name.as_str(), arg.clone());
    }
    eval(&lambda.body, &local)
}

/// Builds a closure from `(parameters body)`. The closure keeps a deep copy of `env`.
pub fn to_lambda(args: &List, env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "lambda")?;
    let (parameters, body) = match (args.get(0), args.get(1)) {
        (Some(parameters), Some(body)) => (parameters, body),
        _ => unreachable!(), // length checked above
    };
    let parameters = parameters
        .as_list()?
        .iter()
        .map(|p| p.as_text().map(String::from))
        .collect::<std::result::Result<Vec<String>, TypeMismatch>>()?;
    Ok(Value::Lambda(Rc::new(Lambda {
        parameters,
        body: body.clone(),
        captured: env.snapshot(),
    })))
}

/// Evaluates every element, in order, into a new list.
pub fn evaluate_each(args: &List, env: &Rc<Environment>) -> Result<List> {
    args.iter().map(|arg| eval(arg, env)).collect()
}
