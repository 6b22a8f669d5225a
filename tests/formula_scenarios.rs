// End-to-end scenarios for coordinate templates taken from real puzzles.
use geopingu::{EvaluationError, Formula, Literal, NotExistingVariableError, SyntaxError};
use pretty_assertions::assert_eq;

fn solve(template: &str, bindings: &[(&str, Literal)]) -> String {
    let mut formula = Formula::new(template).unwrap();
    for (name, value) in bindings {
        formula.set_variable(name, value.clone()).unwrap();
    }
    assert!(formula.all_variables_set());
    formula.evaluate().unwrap()
}

#[test]
fn test_digit_per_region() {
    let bindings = [
        ("A", Literal::from(8)),
        ("B", Literal::from(2)),
        ("C", Literal::from(3)),
        ("D", Literal::from(1)),
        ("E", Literal::from(8)),
        ("F", Literal::from(6)),
        ("G", Literal::from(8)),
    ];
    assert_eq!(
        solve("N48 4[B+D].[F/C][G/B][D+A] E8 5[A-B].[E-8][A][E]", &bindings),
        "N48 43.249 E8 56.088"
    );
}

#[test]
fn test_multi_digit_region() {
    assert_eq!(
        solve("N48 43.333 E008 52.[A+145]", &[("A", Literal::from(235))]),
        "N48 43.333 E008 52.380"
    );
}

#[test]
fn test_letter_sum_of_joined_words() {
    let bindings = [("A", Literal::from("hallo")), ("B", Literal::from("suz"))];
    assert_eq!(
        solve("N48 43.333 E008 52.[bww(A#B) + 25]", &bindings),
        "N48 43.333 E008 52.139"
    );
}

#[test]
fn test_function_names_match_exactly() {
    let formula = Formula::new("N48 [Max+MOD].[Len#QS]").unwrap();
    assert_eq!(formula.variables(), vec!["Max", "MOD", "Len", "QS"]);
    assert_eq!(
        solve("[Max+1]", &[("Max", Literal::from(4))]),
        "5"
    );
    assert_eq!(
        Formula::new("[BWW(A)]").err(),
        Some(SyntaxError::MissingOperator)
    );
}

#[test]
fn test_overflow_never_reaches_the_coordinate() {
    let mut formula = Formula::new("N48 [A*A]").unwrap();
    formula
        .set_variable("A", Literal::from_input("1e200"))
        .unwrap();
    assert_eq!(
        formula.evaluate(),
        Err(EvaluationError::NotFinite {
            function: "*".to_string()
        })
    );
    assert!(matches!(
        Formula::new(format!("N48 [{}]", "9".repeat(400))),
        Err(SyntaxError::NumberOutOfRange { .. })
    ));
}

#[test]
fn test_function_without_arguments_is_rejected() {
    assert_eq!(
        Formula::new("[bww\"abc\"]").err(),
        Some(SyntaxError::MissingArgumentList {
            function: "bww".to_string()
        })
    );
}

#[test]
fn test_template_without_regions() {
    let formula = Formula::new("N48 43.333 E008 52.111").unwrap();
    assert!(formula.variables().is_empty());
    assert!(formula.all_variables_set());
    assert_eq!(formula.evaluate().unwrap(), "N48 43.333 E008 52.111");
}

#[test]
fn test_missing_closing_bracket() {
    assert!(matches!(
        Formula::new("N48 43.333 E008 52.[A+B"),
        Err(SyntaxError::UnbalancedBracket { .. })
    ));
}

#[test]
fn test_rejected_templates() {
    let cases: &[(&str, SyntaxError)] = &[
        ("", SyntaxError::EmptyTemplate),
        ("N48 [A+(B]", SyntaxError::UnbalancedParenthesis),
        ("N48 [A+B)]", SyntaxError::UnbalancedParenthesis),
        ("N48 []", SyntaxError::EmptyExpression),
        ("N48 [A+]", SyntaxError::MissingOperand),
        ("N48 [(A)(B)]", SyntaxError::MissingOperator),
        ("N48 [A,B]", SyntaxError::MisplacedArgumentSeparator),
    ];
    for (template, expected) in cases {
        assert_eq!(
            Formula::new(*template).err().as_ref(),
            Some(expected),
            "template {template:?}"
        );
    }
    assert!(matches!(
        Formula::new("[\"abc]"),
        Err(SyntaxError::InvalidStringLiteral { .. })
    ));
    assert!(matches!(
        Formula::new("[1.2.3]"),
        Err(SyntaxError::DecimalSeparatorMisplaced { .. })
    ));
    assert!(matches!(
        Formula::new("[12a]"),
        Err(SyntaxError::NumberContainsLetter { .. })
    ));
    assert!(matches!(
        Formula::new("[A$B]"),
        Err(SyntaxError::UnrecognizedToken { .. })
    ));
}

#[test]
fn test_functions_and_nesting() {
    let bindings = [("A", Literal::from(17)), ("B", Literal::from(5))];
    assert_eq!(solve("[max(min(A, B), mod(A, B))]", &bindings), "5");
    assert_eq!(solve("[qs(A*B)]", &bindings), "13");
    assert_eq!(solve("[iqs(A*B)]", &bindings), "4");
    assert_eq!(solve("[-(A-B)*2]", &bindings), "-24");
    assert_eq!(solve("[A/2]", &bindings), "8.5");
    assert_eq!(solve("[len(\"geo\"#A)]", &bindings), "5");
}

#[test]
fn test_unknown_variable_is_rejected() {
    let mut formula = Formula::new("N48 [A+B]").unwrap();
    assert_eq!(
        formula.set_variable("C", 1),
        Err(NotExistingVariableError {
            name: "C".to_string()
        })
    );
    formula.set_variable("A", 1).unwrap();
    formula.set_variable("B", 1).unwrap();
    assert!(formula.set_variable("C", 1).is_err());
    assert!(formula.get_variable("C").is_err());
    assert_eq!(formula.evaluate().unwrap(), "N48 2");
}

#[test]
fn test_evaluate_requires_all_bindings() {
    let mut formula = Formula::new("[A][B]").unwrap();
    formula.set_variable("A", 1).unwrap();
    assert_eq!(
        formula.evaluate(),
        Err(EvaluationError::VariablesNotBound {
            missing: vec!["B".to_string()]
        })
    );
}

#[test]
fn test_text_used_as_number() {
    let mut formula = Formula::new("[A+1]").unwrap();
    formula.set_variable("A", "hallo").unwrap();
    assert!(matches!(
        formula.evaluate(),
        Err(EvaluationError::NotNumeric(_))
    ));
}
