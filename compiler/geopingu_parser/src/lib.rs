pub mod parser;

pub use parser::error::SyntaxError;
pub use parser::expression::parse_expression;
pub use parser::template::scan;
