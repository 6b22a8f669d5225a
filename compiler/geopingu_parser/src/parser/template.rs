//! Template scanner: splits a raw template into literal text and
//! bracketed expression regions using nom.

use geopingu_ast::Span;
use geopingu_lexer::tokenize;
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_till},
    character::complete::char,
    combinator::map,
    sequence::delimited,
    IResult,
};

use super::error::SyntaxError;
use super::expression::parse_expression;

/// A piece of the template before its expression has been parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Region(&'a str),
}

fn literal_text(input: &str) -> IResult<&str, Segment<'_>> {
    map(is_not("[]"), Segment::Text)(input)
}

fn expression_region(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(char('['), take_till(|c: char| c == '[' || c == ']'), char(']')),
        Segment::Region,
    )(input)
}

/// Split `raw` into segments. Fails with the offset of the first bracket
/// that has no partner.
fn segments(raw: &str) -> Result<Vec<Segment<'_>>, SyntaxError> {
    let mut rest = raw;
    let mut segments = Vec::new();
    while !rest.is_empty() {
        match alt((expression_region, literal_text))(rest) {
            Ok((next, segment)) => {
                segments.push(segment);
                rest = next;
            }
            Err(_) => {
                return Err(SyntaxError::UnbalancedBracket {
                    offset: raw.len() - rest.len(),
                })
            }
        }
    }
    Ok(segments)
}

/// Scan a template string into spans, tokenizing and parsing every
/// bracketed region on the way.
pub fn scan(raw: &str) -> Result<Vec<Span>, SyntaxError> {
    if raw.is_empty() {
        return Err(SyntaxError::EmptyTemplate);
    }

    let spans = segments(raw)?
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Ok(Span::Literal(text.to_string())),
            Segment::Region(source) => {
                let tokens = tokenize(source)?;
                let program = parse_expression(&tokens)?;
                Ok(Span::Expression {
                    source: source.to_string(),
                    program,
                })
            }
        })
        .collect::<Result<Vec<_>, SyntaxError>>()?;

    debug!(
        "scanned template {:?} into {} spans ({} expressions)",
        raw,
        spans.len(),
        spans.iter().filter(|span| span.is_expression()).count()
    );
    Ok(spans)
}
