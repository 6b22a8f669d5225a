//! Data model of the geopingu formula engine.
//!
//! This crate defines the values a formula computes with ([`Literal`]), the
//! compiled form of one bracketed expression ([`PostfixProgram`]) and the
//! pieces a template string is split into ([`Span`]).

pub mod literal;
pub mod program;
pub mod template;

// Re-export commonly used types
pub use literal::{format_number, Literal, NotNumericError};
pub use program::{Instruction, PostfixProgram};
pub use template::Span;

/// A result type for serialization helpers.
#[cfg(feature = "serde")]
pub type Result<T> = std::result::Result<T, serde_json::Error>;

/// Serializes a value of this crate to a JSON string.
///
/// # Example
///
/// ```
/// use geopingu_ast::{to_json, Literal};
///
/// let json = to_json(&vec![Literal::from(8.0), Literal::from("hallo")]).unwrap();
/// assert_eq!(json, r#"[8.0,"hallo"]"#);
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
}

/// Deserializes a value of this crate from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> Result<T> {
    serde_json::from_str(json)
}
