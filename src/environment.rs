use crate::types::Value;
use crate::{core, special_forms};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One scope in the chain. Lookups walk outward through `outer` until they hit the root.
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnboundSymbol(pub String);

impl fmt::Display for UnboundSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found", self.0)
    }
}

impl Environment {
    pub fn root() -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// A root environment holding the literals, special forms and built-in procedures.
    pub fn standard() -> Rc<Self> {
        let env = Self::root();
        env.bind("nil", Value::Nil);
        env.bind(crate::types::TRUE, Value::boolean(true));
        env.bind(crate::types::FALSE, Value::boolean(false));
        for &func in special_forms::SPECIAL_FORMS.iter().chain(core::CORE.iter()) {
            env.bind(func.name, Value::Native(func));
        }
        env
    }

    pub fn spawn_from(outer: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer.clone()),
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    pub fn fetch(&self, name: &str) -> Result<Value, UnboundSymbol> {
        self.get(name)
            .ok_or_else(|| UnboundSymbol(String::from(name)))
    }

    /// Binds in this scope, shadowing anything further out.
    pub fn bind<T: Into<String>>(&self, name: T, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Updates the nearest scope that already binds `name`. Unbound names are created
    /// here, never at the root.
    pub fn assign(&self, name: &str, value: Value) {
        let mut scope = Some(self);
        while let Some(env) = scope {
            if env.bindings.borrow().contains_key(name) {
                env.bind(name, value);
                return;
            }
            scope = env.outer.as_deref();
        }
        self.bind(name, value);
    }

    /// Deep copies the whole chain, so later changes to `self` are not seen by the copy.
    pub fn snapshot(&self) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            outer: self.outer.as_ref().map(|outer| outer.snapshot()),
        })
    }

    /// This scope's own bindings, sorted by name.
    pub fn local_bindings(&self) -> Vec<(String, Value)> {
        self.bindings
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.bindings.borrow().keys().sorted().join(" ");
        write!(f, "Environment{{{}}}", names)?;
        if let Some(outer) = &self.outer {
            write!(f, " -> {:?}", outer)?;
        }
        Ok(())
    }
}
