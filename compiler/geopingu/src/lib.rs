//! Coordinate formula engine for geocache mystery puzzles.
//!
//! A formula is a coordinate template with bracketed expressions, e.g.
//! `N48 4[B+D].[F/C][G/B][D+A] E8 5[A-B].[E-8][A][E]`. Once every variable
//! is bound, each bracketed region is replaced by its value:
//!
//! ```
//! use geopingu::Formula;
//!
//! let mut formula = Formula::new("N48 43.333 E008 52.[A+145]").unwrap();
//! assert_eq!(formula.variables(), vec!["A"]);
//! formula.set_variable("A", 235).unwrap();
//! assert_eq!(formula.evaluate().unwrap(), "N48 43.333 E008 52.380");
//! ```

pub mod eval;
pub mod formula;
pub mod snapshot;

pub use eval::EvaluationError;
pub use formula::Formula;
pub use geopingu_ast::{Literal, NotNumericError};
pub use geopingu_env::{NotExistingVariableError, Variable};
pub use geopingu_parser::SyntaxError;
pub use snapshot::{Binding, FormulaSnapshot, RestoreError};

use thiserror::Error;

/// Any failure a caller of the engine may need to report to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("invalid formula: {0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    NotExistingVariable(#[from] NotExistingVariableError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl From<RestoreError> for FormulaError {
    fn from(error: RestoreError) -> Self {
        match error {
            RestoreError::Syntax(error) => FormulaError::Syntax(error),
            RestoreError::NotExistingVariable(error) => FormulaError::NotExistingVariable(error),
        }
    }
}
