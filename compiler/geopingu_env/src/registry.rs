//! The fixed table of operators and functions a formula may use.
//!
//! The table is built once per process and is read-only afterwards.
//! Operators are looked up by the symbol they are written with, named
//! functions by their exact identifier (`bww` is a function, `BWW` is an
//! ordinary variable). Every entry also has a unique name, which is what
//! postfix programs refer to.

use std::collections::HashMap;
use std::fmt;

use geopingu_ast::{Literal, NotNumericError};
use lazy_static::lazy_static;
use log::debug;
use thiserror::Error;

/// Precedence of `#` (concatenation)
pub const CONCAT_PRECEDENCE: u8 = 1;
/// Precedence of `+` and `-`
pub const ADDITIVE_PRECEDENCE: u8 = 2;
/// Precedence of `*` and `/`
pub const MULTIPLICATIVE_PRECEDENCE: u8 = 3;
/// Precedence of unary `-` and `+`
pub const PREFIX_PRECEDENCE: u8 = 4;
/// Named functions bind tighter than any operator
pub const MAX_PRECEDENCE: u8 = u8::MAX;

/// Errors raised while applying a function to its arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error(transparent)]
    NotNumeric(#[from] NotNumericError),
    #[error("division by zero")]
    DivisionByZero,
    #[error("the result of '{function}' is too large")]
    NotFinite { function: &'static str },
}

pub type ApplyFn = fn(&[Literal]) -> Result<Literal, FunctionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Binary operator written between its operands, e.g. `A+B`
    Infix,
    /// Unary operator written before its operand, e.g. `-A`
    Prefix,
    /// Named function, e.g. `bww(A)`
    Call,
}

#[derive(Clone, Copy)]
pub struct FunctionSpec {
    /// Unique name used by postfix programs
    pub name: &'static str,
    /// The character an operator is written with; `None` for named functions
    pub symbol: Option<char>,
    pub kind: FunctionKind,
    pub arity: usize,
    pub precedence: u8,
    pub right_associative: bool,
    apply: ApplyFn,
}

impl FunctionSpec {
    fn infix(symbol: char, name: &'static str, precedence: u8, apply: ApplyFn) -> Self {
        Self {
            name,
            symbol: Some(symbol),
            kind: FunctionKind::Infix,
            arity: 2,
            precedence,
            right_associative: false,
            apply,
        }
    }

    fn prefix(symbol: char, name: &'static str, apply: ApplyFn) -> Self {
        Self {
            name,
            symbol: Some(symbol),
            kind: FunctionKind::Prefix,
            arity: 1,
            precedence: PREFIX_PRECEDENCE,
            right_associative: true,
            apply,
        }
    }

    fn call(name: &'static str, arity: usize, apply: ApplyFn) -> Self {
        Self {
            name,
            symbol: None,
            kind: FunctionKind::Call,
            arity,
            precedence: MAX_PRECEDENCE,
            right_associative: false,
            apply,
        }
    }

    /// Apply the function to exactly `arity` arguments, leftmost first.
    pub fn apply(&self, arguments: &[Literal]) -> Result<Literal, FunctionError> {
        debug_assert_eq!(arguments.len(), self.arity, "arity checked by the caller");
        (self.apply)(arguments)
    }
}

impl fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .field("precedence", &self.precedence)
            .field("right_associative", &self.right_associative)
            .finish()
    }
}

#[derive(Debug)]
pub struct Registry {
    specs: Vec<FunctionSpec>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    fn new() -> Self {
        Self {
            specs: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// The built-in operators and functions.
    fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Operators
        registry.insert(FunctionSpec::infix('#', "#", CONCAT_PRECEDENCE, concat));
        registry.insert(FunctionSpec::infix('+', "+", ADDITIVE_PRECEDENCE, add));
        registry.insert(FunctionSpec::infix('-', "-", ADDITIVE_PRECEDENCE, subtract));
        registry.insert(FunctionSpec::infix('*', "*", MULTIPLICATIVE_PRECEDENCE, multiply));
        registry.insert(FunctionSpec::infix('/', "/", MULTIPLICATIVE_PRECEDENCE, divide));
        registry.insert(FunctionSpec::prefix('-', "neg", negate));
        registry.insert(FunctionSpec::prefix('+', "pos", identity));
        // Puzzle helpers
        registry.insert(FunctionSpec::call("bww", 1, word_value));
        registry.insert(FunctionSpec::call("qs", 1, digit_sum));
        registry.insert(FunctionSpec::call("iqs", 1, iterated_digit_sum));
        registry.insert(FunctionSpec::call("len", 1, length));
        registry.insert(FunctionSpec::call("abs", 1, absolute));
        registry.insert(FunctionSpec::call("mod", 2, modulo));
        registry.insert(FunctionSpec::call("min", 2, minimum));
        registry.insert(FunctionSpec::call("max", 2, maximum));
        debug!("registered {} operators and functions", registry.specs.len());
        registry
    }

    fn insert(&mut self, spec: FunctionSpec) {
        self.by_name.insert(spec.name, self.specs.len());
        self.specs.push(spec);
    }

    /// Look up an entry by its unique name, as stored in postfix programs.
    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.by_name.get(name).map(|&index| &self.specs[index])
    }

    /// Look up a named function by the identifier it is called with.
    pub fn function(&self, identifier: &str) -> Option<&FunctionSpec> {
        self.get(identifier)
            .filter(|spec| spec.kind == FunctionKind::Call)
    }

    pub fn is_function(&self, identifier: &str) -> bool {
        self.function(identifier).is_some()
    }

    pub fn infix(&self, symbol: char) -> Option<&FunctionSpec> {
        self.by_symbol(symbol, FunctionKind::Infix)
    }

    pub fn prefix(&self, symbol: char) -> Option<&FunctionSpec> {
        self.by_symbol(symbol, FunctionKind::Prefix)
    }

    fn by_symbol(&self, symbol: char, kind: FunctionKind) -> Option<&FunctionSpec> {
        self.specs
            .iter()
            .find(|spec| spec.kind == kind && spec.symbol == Some(symbol))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.specs.iter()
    }
}

lazy_static! {
    static ref REGISTRY: Registry = Registry::with_builtins();
}

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

fn numbers<const N: usize>(arguments: &[Literal]) -> Result<[f64; N], NotNumericError> {
    let mut values = [0.0; N];
    for (value, argument) in values.iter_mut().zip(arguments) {
        *value = argument.as_number()?;
    }
    Ok(values)
}

/// Wrap an arithmetic result, rejecting overflow to infinity.
fn finite(function: &'static str, value: f64) -> Result<Literal, FunctionError> {
    if value.is_finite() {
        Ok(Literal::Number(value))
    } else {
        Err(FunctionError::NotFinite { function })
    }
}

fn concat(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    Ok(Literal::Text(format!("{}{}", arguments[0], arguments[1])))
}

fn add(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    finite("+", a + b)
}

fn subtract(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    finite("-", a - b)
}

fn multiply(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    finite("*", a * b)
}

fn divide(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    if b == 0.0 {
        return Err(FunctionError::DivisionByZero);
    }
    finite("/", a / b)
}

fn negate(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a] = numbers::<1>(arguments)?;
    Ok(Literal::Number(-a))
}

fn identity(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a] = numbers::<1>(arguments)?;
    Ok(Literal::Number(a))
}

/// Letter sum of a word: a=1 ... z=26, digits count their own value,
/// everything else is ignored.
fn word_value(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let sum: u32 = arguments[0]
        .to_text()
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            letter @ 'a'..='z' => u32::from(letter) - u32::from('a') + 1,
            other => other.to_digit(10).unwrap_or(0),
        })
        .sum();
    Ok(Literal::Number(f64::from(sum)))
}

fn sum_of_digits(value: f64) -> u64 {
    format!("{:.0}", value.abs().trunc())
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(u64::from)
        .sum()
}

fn digit_sum(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a] = numbers::<1>(arguments)?;
    Ok(Literal::Number(sum_of_digits(a) as f64))
}

fn iterated_digit_sum(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a] = numbers::<1>(arguments)?;
    let mut sum = sum_of_digits(a);
    while sum >= 10 {
        sum = sum_of_digits(sum as f64);
    }
    Ok(Literal::Number(sum as f64))
}

fn length(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    Ok(Literal::Number(arguments[0].to_text().chars().count() as f64))
}

fn absolute(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a] = numbers::<1>(arguments)?;
    Ok(Literal::Number(a.abs()))
}

fn modulo(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    if b == 0.0 {
        return Err(FunctionError::DivisionByZero);
    }
    Ok(Literal::Number(a % b))
}

fn minimum(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    Ok(Literal::Number(a.min(b)))
}

fn maximum(arguments: &[Literal]) -> Result<Literal, FunctionError> {
    let [a, b] = numbers::<2>(arguments)?;
    Ok(Literal::Number(a.max(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, arguments: &[Literal]) -> Result<Literal, FunctionError> {
        registry()
            .get(name)
            .unwrap_or_else(|| panic!("{name} is not registered"))
            .apply(arguments)
    }

    #[test]
    fn operators_are_found_by_symbol() {
        let plus = registry().infix('+').unwrap();
        assert_eq!(plus.name, "+");
        assert_eq!(plus.arity, 2);
        assert!(!plus.right_associative);

        let minus = registry().prefix('-').unwrap();
        assert_eq!(minus.name, "neg");
        assert!(minus.right_associative);
        assert!(minus.precedence > registry().infix('*').unwrap().precedence);

        assert!(registry().infix('%').is_none());
    }

    #[test]
    fn functions_match_exact_names() {
        assert!(registry().function("BWW").is_none());
        assert!(!registry().is_function("Max"));
        assert_eq!(registry().function("bww").unwrap().precedence, MAX_PRECEDENCE);
        // Operator names are not callable identifiers.
        assert!(registry().function("neg").is_none());
        assert!(!registry().is_function("A"));
    }

    #[test]
    fn word_value_sums_letter_positions() {
        assert_eq!(call("bww", &["hallo".into()]), Ok(Literal::from(48)));
        assert_eq!(call("bww", &["suz".into()]), Ok(Literal::from(66)));
        assert_eq!(call("bww", &["Hallo Suz".into()]), Ok(Literal::from(114)));
        assert_eq!(call("bww", &["a1".into()]), Ok(Literal::from(2)));
    }

    #[test]
    fn concatenation_joins_text_forms() {
        assert_eq!(
            call("#", &["hallo".into(), "suz".into()]),
            Ok(Literal::from("hallosuz"))
        );
        assert_eq!(call("#", &[4.into(), 2.into()]), Ok(Literal::from(42)));
    }

    #[test]
    fn arithmetic_coerces_numeric_text() {
        assert_eq!(call("+", &["8".into(), 1.into()]), Ok(Literal::from(9)));
        assert_eq!(call("-", &[8.into(), 2.into()]), Ok(Literal::from(6)));
        assert_eq!(call("/", &[6.into(), 3.into()]), Ok(Literal::from(2)));
        assert_eq!(
            call("*", &["x".into(), 1.into()]),
            Err(FunctionError::NotNumeric(NotNumericError { value: "x".into() }))
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            call("/", &[1.into(), 0.into()]),
            Err(FunctionError::DivisionByZero)
        );
        assert_eq!(
            call("mod", &[1.into(), 0.into()]),
            Err(FunctionError::DivisionByZero)
        );
    }

    #[test]
    fn overflow_is_not_finite() {
        assert_eq!(
            call("*", &[1e200.into(), 1e200.into()]),
            Err(FunctionError::NotFinite { function: "*" })
        );
        assert_eq!(
            call("+", &[f64::MAX.into(), f64::MAX.into()]),
            Err(FunctionError::NotFinite { function: "+" })
        );
        assert_eq!(
            call("/", &[1e300.into(), 1e-300.into()]),
            Err(FunctionError::NotFinite { function: "/" })
        );
    }

    #[test]
    fn digit_sums() {
        assert_eq!(call("qs", &[1234.into()]), Ok(Literal::from(10)));
        assert_eq!(call("iqs", &[1234.into()]), Ok(Literal::from(1)));
        assert_eq!(call("qs", &[(-56).into()]), Ok(Literal::from(11)));
    }

    #[test]
    fn remaining_helpers() {
        assert_eq!(call("len", &["suz".into()]), Ok(Literal::from(3)));
        assert_eq!(call("abs", &[(-3).into()]), Ok(Literal::from(3)));
        assert_eq!(call("mod", &[17.into(), 5.into()]), Ok(Literal::from(2)));
        assert_eq!(call("min", &[17.into(), 5.into()]), Ok(Literal::from(5)));
        assert_eq!(call("max", &[17.into(), 5.into()]), Ok(Literal::from(17)));
        assert_eq!(call("neg", &[5.into()]), Ok(Literal::from(-5)));
    }
}
