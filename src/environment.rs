use std::collections::HashMap;

use super::error::RuntimeError;
use super::lexer::Token;
use super::value::Value;

/// The single global scope of a session. There is no nesting yet, so lookups never
/// fall back to an enclosing frame.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name`; redeclaring an existing name silently replaces its value.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        match self.bindings.get(&name.lexeme) {
            Some(value) => Ok(value.clone()),
            None => Err(undefined(name)),
        }
    }

    /// Updates an existing binding. Assigning to an undeclared name is an error.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        match self.bindings.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}
