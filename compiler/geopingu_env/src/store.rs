//! Variable slots of one formula, in the order the variables were first seen.

use std::collections::HashMap;

use geopingu_ast::Literal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the variable '{name}' does not exist in this formula")]
pub struct NotExistingVariableError {
    pub name: String,
}

/// A named slot that may hold a bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: Option<Literal>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Literal> {
        self.value.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    slots: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unbound slot for `name` unless one exists. Returns true if the
    /// slot is new.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.slots.len());
        self.slots.push(Variable::new(name));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Variable, NotExistingVariableError> {
        self.index
            .get(name)
            .map(|&index| &self.slots[index])
            .ok_or_else(|| NotExistingVariableError {
                name: name.to_string(),
            })
    }

    /// The bound value of `name`, if the variable exists and is bound.
    pub fn value(&self, name: &str) -> Option<&Literal> {
        self.get(name).ok().and_then(Variable::value)
    }

    /// Bind `value` to an existing variable and return the previous value.
    pub fn bind(
        &mut self,
        name: &str,
        value: Literal,
    ) -> Result<Option<Literal>, NotExistingVariableError> {
        let slot = self.slot_mut(name)?;
        Ok(slot.value.replace(value))
    }

    /// Remove the value of an existing variable and return it.
    pub fn unbind(&mut self, name: &str) -> Result<Option<Literal>, NotExistingVariableError> {
        let slot = self.slot_mut(name)?;
        Ok(slot.value.take())
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Variable, NotExistingVariableError> {
        match self.index.get(name) {
            Some(&index) => Ok(&mut self.slots[index]),
            None => Err(NotExistingVariableError {
                name: name.to_string(),
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(Variable::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.slots.iter()
    }

    pub fn unbound(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|variable| !variable.is_bound())
            .map(Variable::name)
    }

    pub fn all_bound(&self) -> bool {
        self.slots.iter().all(Variable::is_bound)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
