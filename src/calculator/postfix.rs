//! Shunting-yard conversion from infix text to postfix tokens.
//!
//! Rules:
//! - Digits and `.` accumulate into a number literal; any other character ends it.
//! - Unary minus is rewritten as `0 - x`: a `0` is emitted and `-` is pushed
//!   without popping anything.
//! - Binary operators pop while the top of the stack binds at least as tightly,
//!   which makes every operator left-associative. `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.

use tracing::{debug, trace};

use super::error::CalcError;
use super::token::{Operator, Token, render_postfix};
use super::validation::validate;

/// An entry on the operator stack.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Group,
    Operator(Operator),
}

impl Pending {
    /// An open parenthesis has precedence 0, so popping by precedence stops at it.
    fn precedence(self) -> u8 {
        match self {
            Self::Group => 0,
            Self::Operator(op) => op.precedence(),
        }
    }
}

/// Validate an infix expression and convert it to postfix.
pub fn to_postfix(expression: &str) -> Result<Vec<Token>, CalcError> {
    validate(expression)?;
    convert(expression)
}

/// Convert an expression that has already passed validation.
///
/// Unmatched parentheses are tolerated here; callers are expected to have
/// run [`validate`] first. Only malformed number literals can still fail.
pub(crate) fn convert(expression: &str) -> Result<Vec<Token>, CalcError> {
    let mut out: Vec<Token> = Vec::new();
    let mut ops: Vec<Pending> = Vec::new();
    let mut number = String::new();

    // True at the start and right after `(` or an operator.
    let mut expect_unary = true;

    for c in expression.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            expect_unary = false;
            continue;
        }

        flush_number(&mut number, &mut out)?;

        match c {
            '(' => {
                ops.push(Pending::Group);
                expect_unary = true;
            }

            ')' => {
                while let Some(top) = ops.pop() {
                    match top {
                        Pending::Group => break,
                        Pending::Operator(op) => out.push(op.into()),
                    }
                }
                expect_unary = false;
            }

            // A second leading `-` keeps `expect_unary` set, so `--3` and `-(` still work.
            '-' if expect_unary => {
                trace!("rewriting unary minus as 0 - x");
                out.push(Token::Number {
                    value: 0.0,
                    text: "0".to_string(),
                });
                ops.push(Pending::Operator(Operator::Subtract));
            }

            _ => {
                if let Some(op) = Operator::from_char(c) {
                    while let Some(&top) = ops.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        if let Some(Pending::Operator(popped)) = ops.pop() {
                            out.push(popped.into());
                        }
                    }
                    ops.push(Pending::Operator(op));
                    expect_unary = true;
                }
            }
        }
    }

    flush_number(&mut number, &mut out)?;

    // Leftover `(` can only appear for unvalidated input and is dropped.
    while let Some(top) = ops.pop() {
        if let Pending::Operator(op) = top {
            out.push(op.into());
        }
    }

    debug!(expression, postfix = %render_postfix(&out), "converted to postfix");
    Ok(out)
}

fn flush_number(number: &mut String, out: &mut Vec<Token>) -> Result<(), CalcError> {
    if number.is_empty() {
        return Ok(());
    }
    trace!(literal = %number, "number");
    out.push(Token::number(number)?);
    number.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(expression: &str) -> String {
        render_postfix(&to_postfix(expression).unwrap())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("2 + 3 * 4"), "2 3 4 * +");
        assert_eq!(postfix("(2 + 3) * 4"), "2 3 + 4 *");
        assert_eq!(postfix("2 * 3 ^ 2"), "2 3 2 ^ *");
        assert_eq!(postfix("8 / 4 - 1"), "8 4 / 1 -");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("10 - 4 - 3"), "10 4 - 3 -");
        assert_eq!(postfix("2 ^ 3 ^ 2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(postfix("-3 + 5"), "0 3 - 5 +");
        assert_eq!(postfix("-(3 + 5)"), "0 3 5 + -");
        assert_eq!(postfix("2 * -3"), "2 0 3 - *");
        assert_eq!(postfix("--3"), "0 0 3 - -");
        assert_eq!(postfix("(-2)"), "0 2 -");
    }

    #[test]
    fn test_unary_plus_not_rewritten() {
        assert_eq!(postfix("+4"), "4 +");
    }

    #[test]
    fn test_literals_rendered_as_typed() {
        assert_eq!(postfix("3.50+.5"), "3.50 .5 +");
        assert_eq!(postfix("007 * 2"), "007 2 *");
    }

    #[test]
    fn test_whitespace_splits_numbers() {
        assert_eq!(postfix("1 2"), "1 2");
        assert_eq!(postfix("  12  "), "12");
    }

    #[test]
    fn test_empty_group() {
        assert!(to_postfix("()").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(matches!(
            to_postfix("(2 + 3"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(
            to_postfix("2 + a"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(to_postfix(""), Err(CalcError::InvalidExpression(_))));
    }

    #[test]
    fn test_malformed_number_rejected() {
        assert!(matches!(
            to_postfix("1.2.3 + 1"),
            Err(CalcError::InvalidExpression(_))
        ));
        assert!(matches!(to_postfix(". + 1"), Err(CalcError::InvalidExpression(_))));
    }

    #[test]
    fn test_convert_tolerates_unmatched_parentheses() {
        assert_eq!(render_postfix(&convert("(1 + 2").unwrap()), "1 2 +");
        assert_eq!(render_postfix(&convert("1 + 2)").unwrap()), "1 2 +");
    }
}
