use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{EvalError, Result};
use crate::value::{EnvRef, Value};

/// A lexical scope: its own bindings plus an optional link to the scope it
/// was created inside. Children point up toward the root; the root has no
/// parent. This is strictly acyclic by construction (spec.md §3/§9) — a
/// Lambda's captured environment's parent is only ever set, at call time, to
/// the environment the call happened in, which sits further up the tree.
#[derive(Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn child_of(parent: EnvRef) -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<EnvRef> {
        self.parent.clone()
    }

    pub fn set_parent(&mut self, parent: EnvRef) {
        self.parent = Some(parent);
    }

    /// Searches this scope, then recursively its parents. Returns a deep
    /// copy of the bound value so the caller can never mutate what the
    /// environment holds.
    pub fn lookup(&self, sym: &str) -> Result<Value> {
        if let Some(v) = self.bindings.get(sym) {
            return Ok(v.deep_copy());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(sym),
            None => Err(EvalError::UnboundSymbol(sym.to_string())),
        }
    }

    /// Local bind: replaces an existing binding in this scope or appends a
    /// new one. Never touches the parent chain.
    pub fn put(&mut self, sym: &str, value: &Value) {
        self.bindings.insert(sym.to_string(), value.deep_copy());
    }

    /// Walks to the root of the environment chain.
    pub fn root(env: &EnvRef) -> EnvRef {
        let mut current = Rc::clone(env);
        loop {
            let next = current.borrow().parent();
            match next {
                Some(p) => current = p,
                None => return current,
            }
        }
    }

    /// Global bind: walks up to the root scope and puts there.
    pub fn def(env: &EnvRef, sym: &str, value: &Value) {
        Environment::root(env).borrow_mut().put(sym, value);
    }

    /// Deep-copies this scope's bindings; the parent link is copied by
    /// reference (the same `Rc`), not deep-copied, matching spec.md §4.2.
    pub fn copy(&self) -> Environment {
        Environment {
            bindings: self
                .bindings
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_copy()))
                .collect(),
            parent: self.parent.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
