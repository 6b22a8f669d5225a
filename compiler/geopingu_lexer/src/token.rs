use std::fmt;

/// The type of a token inside an expression region.
///
/// Numbers keep their source text; converting them into a value is the
/// parser's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A run of digits with at most one decimal separator, e.g. `145` or `2.5`
    Number(String),
    /// Quoted text without the quotes, e.g. `hallo` for `"hallo"`
    Text(String),
    /// A variable or function name matching `[A-Za-z][A-Za-z0-9]*`
    Identifier(String),
    /// Any other single character, e.g. `+` or `#`
    Operator(char),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,` between the arguments of a function call
    ArgumentSeparator,
}

/// A token together with its byte offset in the whitespace-stripped
/// expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is
    pub token_type: TokenType,
    /// The 0-based byte offset where the token starts
    pub offset: usize,
}

impl Token {
    /// Create a new token at the given offset
    pub fn new(token_type: TokenType, offset: usize) -> Self {
        Self { token_type, offset }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Number(text) | TokenType::Identifier(text) => f.write_str(text),
            TokenType::Text(text) => write!(f, "\"{text}\""),
            TokenType::Operator(symbol) => write!(f, "{symbol}"),
            TokenType::OpenParen => f.write_str("("),
            TokenType::CloseParen => f.write_str(")"),
            TokenType::ArgumentSeparator => f.write_str(","),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token_type.fmt(f)
    }
}
