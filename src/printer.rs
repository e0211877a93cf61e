use crate::types::Value;
use itertools::Itertools;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Integer(value) => write!(f, "{}", value),
            // No escaping: text is shown exactly as it was read.
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::List(elements) => write!(f, "({})", elements.iter().join(" ")),
            Value::Native(_) => write!(f, "PROC"),
            Value::Lambda(_) => write!(f, "<Lambda>"),
        }
    }
}

pub fn repr(value: &Value) -> String {
    value.to_string()
}
