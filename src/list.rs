use crate::types::Value;
use std::fmt;
use std::iter::FromIterator;

/// A singly-linked cons list. Each cell owns its head and the rest of the chain, so cloning
/// a list copies every cell.
///
/// A cell with no head never has a tail: the list is either fully empty or holds a value at
/// every position. The fields are private and the constructors below keep it that way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    head: Option<Box<Value>>,
    tail: Option<Box<List>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantViolation;

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list cell has a tail but no head")
    }
}

impl List {
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    pub fn singleton(value: Value) -> Self {
        Self {
            head: Some(Box::new(value)),
            tail: None,
        }
    }

    pub fn cons(head: Value, tail: List) -> Self {
        Self {
            head: Some(Box::new(head)),
            tail: match tail.is_empty() {
                true => None,
                false => Some(Box::new(tail)),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.tail.is_none()
    }

    /// Walks the whole chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn head(&self) -> Option<&Value> {
        self.head.as_deref()
    }

    pub fn tail(&self) -> Option<&List> {
        self.tail.as_deref()
    }

    /// Everything after the head, copied out.
    pub fn rest(&self) -> List {
        self.tail().cloned().unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.iter().nth(index)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { cell: Some(self) }
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        match (&self.head, &self.tail) {
            (None, Some(_)) => Err(InvariantViolation),
            _ => Ok(()),
        }
    }

    pub fn push_back(&mut self, value: Value) -> Result<(), InvariantViolation> {
        self.check()?;
        if self.head.is_none() {
            self.head = Some(Box::new(value));
            return Ok(());
        }
        if let Some(tail) = self.tail.as_deref_mut() {
            return tail.push_back(value);
        }
        self.tail = Some(Box::new(List::singleton(value)));
        Ok(())
    }

    /// Splices `other` onto the end of this list. No cells are shared: `other` is moved in.
    pub fn append(&mut self, other: List) -> Result<(), InvariantViolation> {
        self.check()?;
        other.check()?;
        if self.head.is_none() {
            *self = other;
            return Ok(());
        }
        if other.is_empty() {
            return Ok(());
        }
        if let Some(tail) = self.tail.as_deref_mut() {
            return tail.append(other);
        }
        self.tail = Some(Box::new(other));
        Ok(())
    }
}

pub struct Iter<'a> {
    cell: Option<&'a List>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cell?;
        let head = cell.head.as_deref()?;
        self.cell = cell.tail.as_deref();
        Some(head)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let values: Vec<Value> = iter.into_iter().collect();
        values
            .into_iter()
            .rev()
            .fold(List::new(), |tail, head| List::cons(head, tail))
    }
}
