use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raised when a text literal is used where a number is required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the value \"{value}\" is not numeric")]
pub struct NotNumericError {
    /// The text that could not be read as a number
    pub value: String,
}

/// A scalar value inside a formula: either a number or a piece of text.
///
/// Text that looks like a number coerces to one, so a variable bound to the
/// chat input `"8"` works in arithmetic. Two literals are equal when their
/// normalized text forms are equal, see [`format_number`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    /// Build a literal from user input: a number when the trimmed input is a
    /// finite number, text otherwise.
    pub fn from_input(input: &str) -> Self {
        match parse_number(input) {
            Some(number) => Literal::Number(number),
            None => Literal::Text(input.to_string()),
        }
    }

    /// Coerce the literal to a number.
    pub fn as_number(&self) -> Result<f64, NotNumericError> {
        match self {
            Literal::Number(number) => Ok(*number),
            Literal::Text(text) => parse_number(text).ok_or_else(|| NotNumericError {
                value: text.clone(),
            }),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_ok()
    }

    /// The text form of the literal; numbers are rendered with [`format_number`].
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Literal::Number(number) => Cow::Owned(format_number(*number)),
            Literal::Text(text) => Cow::Borrowed(text),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Render a number the way it is substituted into a template.
///
/// Integral values print as plain decimal digits without padding (`380`,
/// `-4`). Other values are rounded to six fractional digits with trailing
/// zeros removed (`2.5`, `0.333333`). Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    let rounded = if value.abs() < 1e15 {
        (value * 1e6).round() / 1e6
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{rounded:.0}");
    }
    let text = format!("{rounded:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.to_text() == other.to_text()
    }
}

impl Eq for Literal {}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(f64::from(value))
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(format_number(380.0), "380");
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractional_numbers_are_minimal() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(2.0000001), "2");
    }

    #[test]
    fn text_coerces_when_numeric() {
        assert_eq!(Literal::from("8").as_number(), Ok(8.0));
        assert_eq!(Literal::from(" 2.5 ").as_number(), Ok(2.5));
        assert_eq!(
            Literal::from("hallo").as_number(),
            Err(NotNumericError {
                value: "hallo".into()
            })
        );
        assert!(!Literal::from("inf").is_numeric());
    }

    #[test]
    fn input_becomes_number_or_text() {
        assert!(matches!(Literal::from_input("235"), Literal::Number(n) if n == 235.0));
        assert!(matches!(Literal::from_input("suz"), Literal::Text(ref t) if t == "suz"));
    }

    #[test]
    fn equality_uses_normalized_value() {
        assert_eq!(Literal::from(8), Literal::from("8"));
        assert_eq!(Literal::from(2.50), Literal::from(2.5));
        assert_ne!(Literal::from("08"), Literal::from(8));
        assert_eq!(Literal::from(145).to_string(), "145");
    }
}
