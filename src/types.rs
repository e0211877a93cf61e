use crate::environment::Environment;
use crate::evaluator;
use crate::list::List;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Int = i64;

pub const TRUE: &str = "#t";
pub const FALSE: &str = "#f";

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

/// A built-in callable. It receives the caller's environment and its arguments exactly as
/// written, and evaluates whichever of them it needs. However many arguments it gets, it
/// runs.
pub struct NativeProcedure {
    pub name: &'static str,
    pub fn_ptr: fn(&Rc<Environment>, &List) -> evaluator::Result,
}

impl fmt::Debug for NativeProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native procedure #<{}>", self.name)
    }
}

/// A user-defined closure. `captured` is a private copy of the scope the lambda was
/// created in, not a live view of it.
pub struct Lambda {
    pub parameters: Vec<String>,
    pub body: Value,
    pub captured: Rc<Environment>,
}

impl fmt::Debug for Lambda {
    // Not derived: the captured scope may well contain this Lambda.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lambda{{parameters: ({}), body: {:?}}}",
            self.parameters.iter().join(" "),
            self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Integer(Int),
    /// Both a symbol name and an opaque string; the reader makes no distinction.
    Text(String),
    List(List),
    Native(&'static NativeProcedure),
    Lambda(Rc<Lambda>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Integer,
    Text,
    List,
    Native,
    Lambda,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Nil => "nil",
            Kind::Integer => "integer",
            Kind::Text => "text",
            Kind::List => "list",
            Kind::Native => "native procedure",
            Kind::Lambda => "lambda",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: Kind,
    pub found: Kind,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Integer(_) => Kind::Integer,
            Value::Text(_) => Kind::Text,
            Value::List(_) => Kind::List,
            Value::Native(_) => Kind::Native,
            Value::Lambda(_) => Kind::Lambda,
        }
    }

    fn mismatch(&self, expected: Kind) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_text(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::Text(s) => Ok(s),
            _ => Err(self.mismatch(Kind::Text)),
        }
    }

    pub fn as_list(&self) -> Result<&List, TypeMismatch> {
        match self {
            Value::List(l) => Ok(l),
            _ => Err(self.mismatch(Kind::List)),
        }
    }

    pub fn into_list(self) -> Result<List, TypeMismatch> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(other.mismatch(Kind::List)),
        }
    }

    pub fn is_nil(&self) -> bool {
        match self {
            Value::Nil => true,
            _ => false,
        }
    }

    pub fn text(name: &str) -> Self {
        Value::Text(String::from(name))
    }

    pub fn boolean(b: bool) -> Self {
        match b {
            true => Value::text(TRUE),
            false => Value::text(FALSE),
        }
    }

    pub fn new_list() -> Self {
        Value::List(List::new())
    }

    pub fn wrap_list(elements: Vec<Value>) -> Self {
        Value::List(elements.into_iter().collect())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Integer(x), Integer(y)) => x == y,
            (Text(x), Text(y)) => x == y,
            (List(x), List(y)) => x == y,
            (Native(x), Native(y)) => std::ptr::eq(*x, *y),
            (Lambda(x), Lambda(y)) => Rc::ptr_eq(x, y),
            (_, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_report_both_kinds() {
        let value = Value::Integer(3);
        assert_eq!(value.as_int(), Ok(3));
        assert_eq!(
            value.as_text(),
            Err(TypeMismatch {
                expected: Kind::Text,
                found: Kind::Integer
            })
        );
        assert_eq!(
            Value::Nil.as_list().unwrap_err().to_string(),
            "expected list, found nil"
        );
        assert!(Value::Nil.is_nil());
        assert!(!Value::new_list().is_nil());
    }

    #[test]
    fn equality_is_structural_for_data() {
        assert_eq!(
            Value::wrap_list(vec![Value::Integer(1), Value::text("a")]),
            Value::wrap_list(vec![Value::Integer(1), Value::text("a")])
        );
        assert_ne!(Value::Integer(1), Value::text("1"));
        assert_ne!(Value::Nil, Value::new_list());
        assert_eq!(Value::boolean(false), Value::text("#f"));
    }

    #[test]
    fn arity_ranges() {
        assert!(Arity::exactly(2).contains(2));
        assert!(!Arity::exactly(2).contains(3));
        assert!(Arity::at_least(1).contains(7));
        assert!(Arity::Between(2..=3).validate_for(1, "lambda").is_err());
        assert_eq!(
            Arity::exactly(2)
                .validate_for(1, "lambda")
                .unwrap_err()
                .to_string(),
            "When evaluating lambda expected exactly 2 arguments, but received 1 arguments"
        );
    }
}
