//! Command registry - name to handler descriptor table

use super::handlers::{self, HandlerFn};
use std::collections::HashMap;

/// A registered command: its name, exact argument count and handler
#[derive(Clone, Copy)]
pub struct HandlerDescriptor {
    pub name: &'static str,
    pub arity: usize,
    pub handler: HandlerFn,
}

impl std::fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Table of commands the executor accepts
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, HandlerDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("setValue", 2, handlers::handle_set_value);
        registry.register("getValue", 1, handlers::handle_get_value);
        // The name argument is required but its value is ignored
        registry.register("createFile", 1, handlers::handle_create_file);
        registry.register("http", 1, handlers::handle_http_get);
        registry
    }

    /// Add or replace a command
    pub fn register(&mut self, name: &'static str, arity: usize, handler: HandlerFn) {
        self.handlers.insert(
            name,
            HandlerDescriptor {
                name,
                arity,
                handler,
            },
        );
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&HandlerDescriptor> {
        self.handlers.get(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all descriptors in name order
    pub fn descriptors(&self) -> impl Iterator<Item = &HandlerDescriptor> {
        let mut descriptors: Vec<&HandlerDescriptor> = self.handlers.values().collect();
        descriptors.sort_unstable_by_key(|d| d.name);
        descriptors.into_iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
