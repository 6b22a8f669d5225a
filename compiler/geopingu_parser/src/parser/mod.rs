// Template and expression parsing for geocache coordinate formulas.
//
// `template` splits the raw template into literal text and bracketed
// regions (nom), `expression` turns the tokens of one region into a
// postfix program (shunting-yard).

pub mod error;
pub mod expression;
pub mod template;

pub use error::SyntaxError;
