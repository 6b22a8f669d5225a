use crate::program::PostfixProgram;

/// A piece of a scanned template, kept in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Text outside brackets, copied through unchanged
    Literal(String),
    /// A bracketed region compiled to postfix form
    Expression {
        /// The text between the brackets, as written
        source: String,
        program: PostfixProgram,
    },
}

impl Span {
    pub fn is_expression(&self) -> bool {
        matches!(self, Span::Expression { .. })
    }

    pub fn program(&self) -> Option<&PostfixProgram> {
        match self {
            Span::Literal(_) => None,
            Span::Expression { program, .. } => Some(program),
        }
    }
}
