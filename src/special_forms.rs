//! Built-ins that choose for themselves which operands to evaluate.

use crate::environment::Environment;
use crate::evaluator::{eval, to_lambda, Result};
use crate::list::List;
use crate::types::{NativeProcedure, Value};
use std::rc::Rc;

// Operand counts are never checked: a missing operand reads as nil, surplus ones are ignored.
fn nth(args: &List, index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Nil)
}

static QUOTE: NativeProcedure = NativeProcedure {
    name: "quote",
    fn_ptr: quote_,
};

fn quote_(_env: &Rc<Environment>, args: &List) -> Result {
    Ok(nth(args, 0).clone())
}

static IF: NativeProcedure = NativeProcedure {
    name: "if",
    fn_ptr: if_,
};

// Only the literal #f selects the else branch; nil and the empty list count as true.
fn if_(env: &Rc<Environment>, args: &List) -> Result {
    let condition = eval(nth(args, 0), env)?;
    if condition == Value::boolean(false) {
        eval(nth(args, 2), env)
    } else {
        eval(nth(args, 1), env)
    }
}

fn assign(env: &Rc<Environment>, name: &Value, value: Value) -> Result {
    let name = name.as_text()?;
    log::debug!("define {} as {}", name, value);
    env.assign(name, value.clone());
    Ok(value)
}

static DEFINE: NativeProcedure = NativeProcedure {
    name: "define",
    fn_ptr: define_,
};

fn define_(env: &Rc<Environment>, args: &List) -> Result {
    let value = eval(nth(args, 1), env)?;
    assign(env, nth(args, 0), value)
}

static SET: NativeProcedure = NativeProcedure {
    name: "set!",
    fn_ptr: define_,
};

static SETQ: NativeProcedure = NativeProcedure {
    name: "setq",
    fn_ptr: setq_,
};

fn setq_(env: &Rc<Environment>, args: &List) -> Result {
    assign(env, nth(args, 0), nth(args, 1).clone())
}

static LAMBDA: NativeProcedure = NativeProcedure {
    name: "lambda",
    fn_ptr: to_lambda_,
};

fn to_lambda_(env: &Rc<Environment>, args: &List) -> Result {
    to_lambda(args, env)
}

static EVAL: NativeProcedure = NativeProcedure {
    name: "eval",
    fn_ptr: eval_,
};

fn eval_(env: &Rc<Environment>, args: &List) -> Result {
    let form = eval(nth(args, 0), env)?;
    eval(&form, env)
}

static ENV: NativeProcedure = NativeProcedure {
    name: "env",
    fn_ptr: env_,
};

fn env_(env: &Rc<Environment>, _args: &List) -> Result {
    let pairs = env
        .local_bindings()
        .into_iter()
        .map(|(name, value)| Value::wrap_list(vec![Value::Text(name), value]))
        .collect();
    Ok(Value::List(pairs))
}

pub(crate) static SPECIAL_FORMS: &[&NativeProcedure] =
    &[&QUOTE, &IF, &DEFINE, &SET, &SETQ, &LAMBDA, &EVAL, &ENV];
