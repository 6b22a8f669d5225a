use std::fmt;
use std::str::FromStr;

use geopingu_ast::{Literal, Span};
use geopingu_env::{NotExistingVariableError, Variable, VariableStore};
use geopingu_parser::{scan, SyntaxError};
use log::debug;

use crate::eval::{self, EvaluationError};
use crate::snapshot::{Binding, FormulaSnapshot, RestoreError};

/// A coordinate template such as `N48 4[B+D].[F/C]` with its variables.
///
/// The template is fully parsed when the formula is created. Afterwards
/// only variable bindings change; evaluating never modifies the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    raw_text: String,
    spans: Vec<Span>,
    variables: VariableStore,
}

impl Formula {
    /// Parse a template string.
    pub fn new(raw_text: impl Into<String>) -> Result<Self, SyntaxError> {
        let raw_text = raw_text.into();
        let spans = scan(&raw_text)?;

        let mut variables = VariableStore::new();
        for program in spans.iter().filter_map(Span::program) {
            for name in program.variables() {
                variables.declare(name);
            }
        }

        debug!(
            "created formula {:?} with variables [{}]",
            raw_text,
            variables.names().collect::<Vec<_>>().join(", ")
        );
        Ok(Self {
            raw_text,
            spans,
            variables,
        })
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Variable names in the order they first appear in the template.
    pub fn variables(&self) -> Vec<&str> {
        self.variables.names().collect()
    }

    pub fn get_variable(&self, name: &str) -> Result<&Variable, NotExistingVariableError> {
        self.variables.get(name)
    }

    /// Bind a value to a variable referenced by the template.
    pub fn set_variable(
        &mut self,
        name: &str,
        value: impl Into<Literal>,
    ) -> Result<(), NotExistingVariableError> {
        let value = value.into();
        debug!("binding {name} = {value}");
        self.variables.bind(name, value)?;
        Ok(())
    }

    /// Remove the value of a variable again, returning it.
    pub fn clear_variable(
        &mut self,
        name: &str,
    ) -> Result<Option<Literal>, NotExistingVariableError> {
        self.variables.unbind(name)
    }

    pub fn all_variables_set(&self) -> bool {
        self.variables.all_bound()
    }

    pub fn unbound_variables(&self) -> Vec<&str> {
        self.variables.unbound().collect()
    }

    /// Substitute every expression region with its result.
    ///
    /// Fails with `VariablesNotBound` while any variable lacks a value. With
    /// every variable bound it can still fail when a text value is used as a
    /// number (`NotNumeric`), on division by zero (`DivisionByZero`, also for
    /// `mod`) and when a result overflows (`NotFinite`); no region is ever
    /// replaced by an infinite or NaN value.
    pub fn evaluate(&self) -> Result<String, EvaluationError> {
        if !self.all_variables_set() {
            return Err(EvaluationError::VariablesNotBound {
                missing: self.variables.unbound().map(str::to_string).collect(),
            });
        }

        let mut result = String::with_capacity(self.raw_text.len());
        for span in &self.spans {
            match span {
                Span::Literal(text) => result.push_str(text),
                Span::Expression { program, .. } => {
                    let value = eval::evaluate(program, &self.variables)?;
                    result.push_str(&value.to_text());
                }
            }
        }
        Ok(result)
    }

    /// The raw template plus the currently bound values.
    pub fn snapshot(&self) -> FormulaSnapshot {
        FormulaSnapshot {
            raw_text: self.raw_text.clone(),
            bindings: self
                .variables
                .iter()
                .filter_map(|variable| {
                    variable.value().map(|value| Binding {
                        name: variable.name().to_string(),
                        value: value.clone(),
                    })
                })
                .collect(),
        }
    }

    /// Re-parse a snapshot's template and re-apply its bindings.
    pub fn restore(snapshot: &FormulaSnapshot) -> Result<Self, RestoreError> {
        let mut formula = Self::new(snapshot.raw_text.as_str())?;
        for binding in &snapshot.bindings {
            formula.set_variable(&binding.name, binding.value.clone())?;
        }
        Ok(formula)
    }
}

impl FromStr for Formula {
    type Err = SyntaxError;

    fn from_str(raw_text: &str) -> Result<Self, Self::Err> {
        Self::new(raw_text)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
