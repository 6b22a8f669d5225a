//! Postfix stack machine for one expression region.

use geopingu_ast::{Instruction, Literal, NotNumericError, PostfixProgram};
use geopingu_env::{registry, FunctionError, VariableStore};
use log::error;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Evaluation was requested before every variable had a value
    #[error("the formula cannot be evaluated, because values are still missing for: {}", .missing.join(", "))]
    VariablesNotBound { missing: Vec<String> },

    /// Internal: the program called a function with too few operands on the stack
    #[error("function '{function}' needs {expected} operand(s) but only {available} are available")]
    ArityMismatch {
        function: String,
        expected: usize,
        available: usize,
    },

    /// Internal: the program did not leave exactly one value
    #[error("malformed program: {remaining} value(s) left on the stack instead of one")]
    MalformedProgram { remaining: usize },

    /// Internal: the program called a name missing from the registry
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error(transparent)]
    NotNumeric(#[from] NotNumericError),

    #[error("division by zero")]
    DivisionByZero,

    #[error("the result of '{function}' is too large")]
    NotFinite { function: String },
}

impl From<FunctionError> for EvaluationError {
    fn from(error: FunctionError) -> Self {
        match error {
            FunctionError::NotNumeric(error) => EvaluationError::NotNumeric(error),
            FunctionError::DivisionByZero => EvaluationError::DivisionByZero,
            FunctionError::NotFinite { function } => EvaluationError::NotFinite {
                function: function.to_string(),
            },
        }
    }
}

/// Run `program` against the bound values in `bindings`.
pub fn evaluate(
    program: &PostfixProgram,
    bindings: &VariableStore,
) -> Result<Literal, EvaluationError> {
    let mut stack: Vec<Literal> = Vec::with_capacity(program.len());

    for instruction in program {
        match instruction {
            Instruction::Push(literal) => stack.push(literal.clone()),
            Instruction::Load(name) => match bindings.value(name) {
                Some(value) => stack.push(value.clone()),
                None => {
                    return Err(EvaluationError::VariablesNotBound {
                        missing: vec![name.clone()],
                    })
                }
            },
            Instruction::Call(name) => {
                let Some(spec) = registry().get(name) else {
                    error!("postfix program `{program}` calls unknown function '{name}'");
                    return Err(EvaluationError::UnknownFunction { name: name.clone() });
                };
                if stack.len() < spec.arity {
                    error!(
                        "postfix program `{program}`: '{name}' needs {} operands, stack holds {}",
                        spec.arity,
                        stack.len()
                    );
                    return Err(EvaluationError::ArityMismatch {
                        function: name.clone(),
                        expected: spec.arity,
                        available: stack.len(),
                    });
                }
                let arguments = stack.split_off(stack.len() - spec.arity);
                stack.push(spec.apply(&arguments)?);
            }
        }
    }

    match stack.pop() {
        Some(result) if stack.is_empty() => Ok(result),
        popped => {
            let remaining = stack.len() + usize::from(popped.is_some());
            error!("postfix program `{program}` left {remaining} values on the stack");
            Err(EvaluationError::MalformedProgram { remaining })
        }
    }
}
