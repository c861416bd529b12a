//! Input validation for the calculator.
//!
//! Rejects malformed input before any parsing work begins. The check is
//! purely syntactic: allowed characters and parenthesis balance. Inputs like
//! `3 + + 4` pass here and fail later during evaluation.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::error::CalcError;

lazy_static! {
    /// Matches strings made only of digits, operators, parentheses, dots and whitespace.
    static ref ALLOWED_CHARS: Regex = Regex::new(r"^[\d+\-*/^().\s]+$").unwrap();
}

/// Validate an expression, describing the first failed check.
pub fn validate(expression: &str) -> Result<(), CalcError> {
    if expression.trim().is_empty() {
        debug!("rejected empty expression");
        return Err(CalcError::InvalidExpression(
            "expression is empty".to_string(),
        ));
    }

    // `\d` is Unicode-aware in `regex`, so ASCII digits are checked separately.
    if !ALLOWED_CHARS.is_match(expression) || has_non_ascii_digit(expression) {
        debug!(expression, "rejected disallowed characters");
        return Err(CalcError::InvalidExpression(
            "only digits, '.', '+', '-', '*', '/', '^' and parentheses are allowed".to_string(),
        ));
    }

    if !has_balanced_parentheses(expression) {
        debug!(expression, "rejected unbalanced parentheses");
        return Err(CalcError::InvalidExpression(
            "unbalanced parentheses".to_string(),
        ));
    }

    Ok(())
}

/// Check whether an expression passes validation.
pub fn is_valid_expression(expression: &str) -> bool {
    validate(expression).is_ok()
}

/// Check that parentheses are balanced.
///
/// The running count of open parentheses must never go negative and must be
/// zero at the end.
pub fn has_balanced_parentheses(expression: &str) -> bool {
    let mut open: usize = 0;

    for c in expression.chars() {
        match c {
            '(' => open += 1,
            ')' => match open.checked_sub(1) {
                Some(n) => open = n,
                None => return false,
            },
            _ => {}
        }
    }

    open == 0
}

fn has_non_ascii_digit(expression: &str) -> bool {
    expression
        .chars()
        .any(|c| c.is_numeric() && !c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expressions_accepted() {
        assert!(is_valid_expression("2 + 3 * 4"));
        assert!(is_valid_expression("(2 + 3) * 4"));
        assert!(is_valid_expression("-(3 + 5)"));
        assert!(is_valid_expression("1.5 ^ 2 / .5"));
        assert!(is_valid_expression("  42  "));
        assert!(is_valid_expression("2\t*\n3"));
    }

    #[test]
    fn test_semantic_errors_pass_validation() {
        assert!(is_valid_expression("3 + + 4"));
        assert!(is_valid_expression("3 + * 4"));
        assert!(is_valid_expression("()"));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(!is_valid_expression(""));
        assert!(!is_valid_expression("   "));
        assert!(matches!(
            validate("\t\n"),
            Err(CalcError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_disallowed_characters_rejected() {
        assert!(!is_valid_expression("2 + a"));
        assert!(!is_valid_expression("10 % 3"));
        assert!(!is_valid_expression("1,000 + 1"));
        assert!(!is_valid_expression("sqrt(4)"));
        assert!(!is_valid_expression("٣ + 1"));
    }

    #[test]
    fn test_unbalanced_parentheses_rejected() {
        assert!(!is_valid_expression("(2 + 3"));
        assert!(!is_valid_expression("2 + 3)"));
        assert!(!is_valid_expression(")2 + 3("));
        assert!(matches!(
            validate("((1)"),
            Err(CalcError::InvalidExpression(msg)) if msg == "unbalanced parentheses"
        ));
    }

    #[test]
    fn test_balance_counter() {
        assert!(has_balanced_parentheses(""));
        assert!(has_balanced_parentheses("(()())"));
        assert!(!has_balanced_parentheses(")("));
        assert!(!has_balanced_parentheses("(()"));
    }
}
