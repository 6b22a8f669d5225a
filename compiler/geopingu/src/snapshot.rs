// Persisted form of a formula: the raw template plus its bound values.

use geopingu_ast::Literal;
use geopingu_env::NotExistingVariableError;
use geopingu_parser::SyntaxError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: Literal,
}

/// What gets stored or sent between processes for a formula. Loading it
/// re-parses `raw_text`, which yields the same spans and variables again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaSnapshot {
    pub raw_text: String,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl FormulaSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    NotExistingVariable(#[from] NotExistingVariableError),
}
