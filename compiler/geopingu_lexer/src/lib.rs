//! Geopingu formula lexical analyzer
//!
//! This crate turns the interior of one bracketed expression region of a
//! coordinate formula (the `B+D` in `N48 4[B+D].000`) into a flat sequence
//! of tokens for the expression parser.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{tokenize, LexError};
pub use token::{Token, TokenType};
