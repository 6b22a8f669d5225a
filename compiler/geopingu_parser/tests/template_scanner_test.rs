use geopingu_ast::Span;
use geopingu_parser::{scan, SyntaxError};
use pretty_assertions::assert_eq;

fn describe(spans: &[Span]) -> Vec<String> {
    spans
        .iter()
        .map(|span| match span {
            Span::Literal(text) => format!("text({text})"),
            Span::Expression { program, .. } => format!("expr({program})"),
        })
        .collect()
}

#[test]
fn test_coordinate_template_spans() {
    let spans = scan("N48 4[B+D].[F/C][G/B][D+A] E8 5[A-B].[E-8][A][E]").unwrap();
    assert_eq!(
        describe(&spans),
        vec![
            "text(N48 4)",
            "expr(B D +)",
            "text(.)",
            "expr(F C /)",
            "expr(G B /)",
            "expr(D A +)",
            "text( E8 5)",
            "expr(A B -)",
            "text(.)",
            "expr(E 8 -)",
            "expr(A)",
            "expr(E)",
        ]
    );
}

#[test]
fn test_region_source_is_kept_verbatim() {
    let spans = scan("52.[bww(A#B) + 25]").unwrap();
    match &spans[1] {
        Span::Expression { source, program } => {
            assert_eq!(source, "bww(A#B) + 25");
            assert_eq!(program.to_string(), "A B # bww 25 +");
        }
        other => panic!("Expected an expression span, got {other:?}"),
    }
}

#[test]
fn test_template_without_brackets() {
    assert_eq!(
        scan("N48 43.333 E008 52.111").unwrap(),
        vec![Span::Literal("N48 43.333 E008 52.111".to_string())]
    );
}

#[test]
fn test_missing_closing_bracket() {
    assert_eq!(
        scan("N48 43.333 E008 52.[A+B"),
        Err(SyntaxError::UnbalancedBracket { offset: 19 })
    );
}

#[test]
fn test_nested_brackets_are_rejected() {
    assert!(matches!(
        scan("N48 [A+[B]]"),
        Err(SyntaxError::UnbalancedBracket { .. })
    ));
}

#[test]
fn test_empty_template_is_rejected() {
    assert_eq!(scan(""), Err(SyntaxError::EmptyTemplate));
}

#[test]
fn test_region_errors_surface_as_syntax_errors() {
    assert_eq!(scan("N48 []"), Err(SyntaxError::EmptyExpression));
    assert_eq!(
        scan("N48 [2A]"),
        Err(SyntaxError::NumberContainsLetter {
            number: "2A".into()
        })
    );
    assert_eq!(
        scan("N48 [A.1]"),
        Err(SyntaxError::DecimalSeparatorMisplaced { offset: 1 })
    );
    assert!(matches!(
        scan("N48 [bww(\"a1\")]"),
        Err(SyntaxError::InvalidStringLiteral { .. })
    ));
    assert_eq!(scan("N48 [(A+1]"), Err(SyntaxError::UnbalancedParenthesis));
    assert_eq!(
        scan("N48 [A!]"),
        Err(SyntaxError::UnrecognizedToken { token: "!".into() })
    );
}

#[test]
fn test_scanning_is_deterministic() {
    let template = "N48 4[B+D].[F/C][G/B][D+A] E8 5[A-B].[E-8][A][E]";
    assert_eq!(scan(template), scan(template));
}
