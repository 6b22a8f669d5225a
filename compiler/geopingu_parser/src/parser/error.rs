use geopingu_lexer::LexError;
use thiserror::Error;

/// Everything that can be wrong with a template string.
///
/// Raised while constructing a formula; a formula is never created from a
/// template that fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("the formula must not be empty")]
    EmptyTemplate,

    #[error("unbalanced bracket at offset {offset}: expression regions are written as [...] and cannot nest")]
    UnbalancedBracket { offset: usize },

    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    #[error("invalid quoted text {literal}: only letters are allowed between quotes")]
    InvalidStringLiteral { literal: String },

    #[error("the '.' character is only allowed once within a number (at offset {offset})")]
    DecimalSeparatorMisplaced { offset: usize },

    #[error("numbers must not contain letters: {number}")]
    NumberContainsLetter { number: String },

    #[error("the number {number} is too large")]
    NumberOutOfRange { number: String },

    #[error("unrecognized token '{token}'")]
    UnrecognizedToken { token: String },

    #[error("empty expression []")]
    EmptyExpression,

    #[error("an operator or function is missing an operand")]
    MissingOperand,

    #[error("two values follow each other without an operator")]
    MissingOperator,

    #[error("function '{function}' takes {expected} argument(s) but {found} were given")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("function '{function}' must be followed by its arguments in parentheses")]
    MissingArgumentList { function: String },

    #[error("',' is only allowed between the arguments of a function call")]
    MisplacedArgumentSeparator,
}

impl From<LexError> for SyntaxError {
    fn from(error: LexError) -> Self {
        match error {
            LexError::InvalidStringLiteral { literal } => {
                SyntaxError::InvalidStringLiteral { literal }
            }
            LexError::DecimalSeparatorMisplaced { offset } => {
                SyntaxError::DecimalSeparatorMisplaced { offset }
            }
            LexError::NumberContainsLetter { number } => {
                SyntaxError::NumberContainsLetter { number }
            }
        }
    }
}
