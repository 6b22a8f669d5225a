//! Tokenizer for one expression region, built on the `logos` crate.
//!
//! `logos` splits the text into raw character-class runs (digits, letters,
//! punctuation). A single pending-token buffer then folds those runs into
//! formula tokens, which is where quoted text, decimal separators and
//! digit/letter mixing are checked.

use crate::token::{Token, TokenType};
use logos::Logos;
use thiserror::Error;

/// Raw character-class runs recognized by logos
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[0-9]+")]
    Digits,
    #[regex(r"[A-Za-z]+")]
    Letters,
    #[token(".")]
    DecimalSeparator,
    #[token("\"")]
    Quote,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(",")]
    Comma,
    // Everything else is a single-character operator candidate.
    #[regex(r#"[^0-9A-Za-z."(),]"#)]
    Symbol,
}

/// Errors raised while tokenizing an expression region
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Quoted text contained something other than letters, was empty or never closed
    #[error("invalid quoted text {literal}: only letters are allowed between quotes")]
    InvalidStringLiteral {
        /// The offending text, starting with the opening quote
        literal: String,
    },
    /// A `.` appeared outside of a number, or twice in the same number
    #[error("the '.' character is only allowed once within a number (at offset {offset})")]
    DecimalSeparatorMisplaced {
        /// Offset of the misplaced separator
        offset: usize,
    },
    /// Letters directly followed a number
    #[error("numbers must not contain letters: {number}")]
    NumberContainsLetter {
        /// The number text including the first offending letters
        number: String,
    },
}

/// The token currently being assembled
#[derive(Debug, Default)]
enum Pending {
    #[default]
    Empty,
    Number {
        text: String,
        start: usize,
        has_separator: bool,
    },
    Identifier {
        text: String,
        start: usize,
    },
    Quoted {
        text: String,
        start: usize,
    },
}

struct Tokenizer {
    tokens: Vec<Token>,
    pending: Pending,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            pending: Pending::Empty,
        }
    }

    fn flush(&mut self) {
        match std::mem::take(&mut self.pending) {
            Pending::Empty => {}
            Pending::Number { text, start, .. } => {
                self.tokens.push(Token::new(TokenType::Number(text), start))
            }
            Pending::Identifier { text, start } => {
                self.tokens.push(Token::new(TokenType::Identifier(text), start))
            }
            Pending::Quoted { .. } => unreachable!("quoted text is closed by its own quote"),
        }
    }

    fn emit(&mut self, token_type: TokenType, offset: usize) {
        self.flush();
        self.tokens.push(Token::new(token_type, offset));
    }

    /// Consume one lexeme while inside quoted text.
    fn quoted(&mut self, lexeme: Lexeme, slice: &str) -> Result<(), LexError> {
        let Pending::Quoted { text, start } = &mut self.pending else {
            return Ok(());
        };
        match lexeme {
            Lexeme::Letters => {
                text.push_str(slice);
                Ok(())
            }
            Lexeme::Quote if !text.is_empty() => {
                let token = Token::new(TokenType::Text(std::mem::take(text)), *start);
                self.pending = Pending::Empty;
                self.tokens.push(token);
                Ok(())
            }
            _ => Err(LexError::InvalidStringLiteral {
                literal: format!("\"{text}{slice}"),
            }),
        }
    }

    fn step(&mut self, lexeme: Lexeme, slice: &str, offset: usize) -> Result<(), LexError> {
        if matches!(self.pending, Pending::Quoted { .. }) {
            return self.quoted(lexeme, slice);
        }

        match lexeme {
            Lexeme::Quote => {
                self.flush();
                self.pending = Pending::Quoted {
                    text: String::new(),
                    start: offset,
                };
            }
            Lexeme::Digits => match &mut self.pending {
                Pending::Number { text, .. } | Pending::Identifier { text, .. } => {
                    text.push_str(slice)
                }
                _ => {
                    self.pending = Pending::Number {
                        text: slice.to_string(),
                        start: offset,
                        has_separator: false,
                    }
                }
            },
            Lexeme::Letters => match &mut self.pending {
                Pending::Number { text, .. } => {
                    return Err(LexError::NumberContainsLetter {
                        number: format!("{text}{slice}"),
                    })
                }
                Pending::Identifier { text, .. } => text.push_str(slice),
                _ => {
                    self.pending = Pending::Identifier {
                        text: slice.to_string(),
                        start: offset,
                    }
                }
            },
            Lexeme::DecimalSeparator => match &mut self.pending {
                Pending::Number {
                    text,
                    has_separator,
                    ..
                } if !*has_separator => {
                    text.push('.');
                    *has_separator = true;
                }
                _ => return Err(LexError::DecimalSeparatorMisplaced { offset }),
            },
            Lexeme::OpenParen => self.emit(TokenType::OpenParen, offset),
            Lexeme::CloseParen => self.emit(TokenType::CloseParen, offset),
            Lexeme::Comma => self.emit(TokenType::ArgumentSeparator, offset),
            Lexeme::Symbol => {
                for (index, symbol) in slice.char_indices() {
                    self.emit(TokenType::Operator(symbol), offset + index);
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token>, LexError> {
        if let Pending::Quoted { text, .. } = &self.pending {
            return Err(LexError::InvalidStringLiteral {
                literal: format!("\"{text}"),
            });
        }
        self.flush();
        Ok(self.tokens)
    }
}

/// Tokenize the interior text of one expression region.
///
/// All whitespace is removed before tokenizing, so `A + 1` and `A+1`
/// produce the same tokens. Offsets refer to the stripped text.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokenizer = Tokenizer::new();

    for (result, span) in Lexeme::lexer(&stripped).spanned() {
        // Every character belongs to exactly one class, an error can only be a stray byte run.
        let lexeme = result.unwrap_or(Lexeme::Symbol);
        tokenizer.step(lexeme, &stripped[span.clone()], span.start)?;
    }

    let tokens = tokenizer.finish()?;
    #[cfg(feature = "logging")]
    log::trace!("tokenized {:?} into {} tokens", stripped, tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn types(input: &str) -> Vec<TokenType> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn identifier_may_contain_digits() {
        assert_eq!(types("A2B"), vec![TokenType::Identifier("A2B".into())]);
    }

    #[test]
    fn whitespace_is_stripped_before_tokenizing() {
        assert_eq!(types(" A +  1 "), types("A+1"));
        assert_eq!(types("1 4 5"), vec![TokenType::Number("145".into())]);
    }

    #[test]
    fn offsets_point_into_stripped_text() {
        let tokens = tokenize("AB + 12").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3]);
    }

    #[test]
    fn empty_quotes_are_rejected() {
        assert!(matches!(
            tokenize("\"\""),
            Err(LexError::InvalidStringLiteral { .. })
        ));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert_eq!(
            tokenize("\"abc"),
            Err(LexError::InvalidStringLiteral {
                literal: "\"abc".into()
            })
        );
    }
}
