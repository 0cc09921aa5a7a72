use crate::dispatch::value::{Arity, Value, ValueKind};
use crate::errors::PipeResult;
use std::collections::HashMap;

/// Signature every dispatchable operation implements: the receiver comes in
/// as the implicit subject, the extra arguments positionally.
pub type Handler = fn(&Value, &[Value]) -> PipeResult<Value>;

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub arity: Arity,
    pub handler: Handler,
}

impl Method {
    pub fn call(&self, receiver: &Value, args: &[Value]) -> PipeResult<Value> {
        (self.handler)(receiver, args)
    }
}

/// Registry of named operations, keyed by the receiver's kind.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<(ValueKind, String), Method>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method, replacing any previous one with the same kind and name.
    pub fn register(&mut self, kind: ValueKind, name: &str, arity: Arity, handler: Handler) -> &mut Self {
        self.methods.insert(
            (kind, name.to_string()),
            Method {
                name: name.to_string(),
                arity,
                handler,
            },
        );
        self
    }

    /// Registers the same method for every value kind.
    pub fn register_all(&mut self, name: &str, arity: Arity, handler: Handler) -> &mut Self {
        for kind in ValueKind::ALL {
            self.register(kind, name, arity, handler);
        }
        self
    }

    pub fn resolve(&self, kind: ValueKind, name: &str) -> Option<&Method> {
        self.methods.get(&(kind, name.to_string()))
    }

    pub fn responds_to(&self, kind: ValueKind, name: &str) -> bool {
        self.resolve(kind, name).is_some()
    }

    /// Sorted names of every method `kind` exposes.
    pub fn methods(&self, kind: ValueKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .methods
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, method)| method.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
