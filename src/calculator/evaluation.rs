//! Postfix evaluation and the top-level `evaluate` pipeline.
//!
//! Wraps the validator, converter and evaluator into a single call and
//! provides a host-facing result type with display formatting.

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::error::CalcError;
use super::postfix::convert;
use super::token::{Token, parse_postfix, render_postfix};
use super::validation::validate;

/// Evaluate a postfix sequence with a single value stack.
///
/// Exactly one value must remain at the end. An empty sequence fails with
/// `StackUnderflow { operator: '=' }`, extra values with `LeftoverOperands`.
pub fn evaluate_postfix(tokens: &[Token]) -> Result<f64, CalcError> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Number { value, .. } => stack.push(*value),
            Token::Operator(op) => {
                let underflow = CalcError::StackUnderflow {
                    operator: op.symbol(),
                };
                let b = stack.pop().ok_or_else(|| underflow.clone())?;
                let a = stack.pop().ok_or(underflow)?;
                let result = op.apply(a, b)?;
                trace!(a, b, operator = %op, result, "applied");
                stack.push(result);
            }
        }
    }

    match stack.len() {
        0 => Err(CalcError::StackUnderflow { operator: '=' }),
        1 => Ok(stack[0]),
        count => Err(CalcError::LeftoverOperands { count }),
    }
}

/// Evaluate an infix expression.
///
/// Validation runs once here; the converter then trusts its input.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    validate(expression)?;
    let postfix = convert(expression)?;
    let value = evaluate_postfix(&postfix)?;
    debug!(expression, value, "evaluated");
    Ok(value)
}

/// Result of evaluating a calculator expression, ready for display.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalcResult {
    /// Successful calculation.
    Success {
        /// The original expression, trimmed.
        expression: String,
        /// The postfix notation of the expression.
        postfix: String,
        /// The numeric value. Serialized as a string when not finite,
        /// since JSON has no NaN or Infinity.
        #[serde(serialize_with = "serialize_value")]
        value: f64,
        /// Formatted for display.
        display_result: String,
    },
    /// Validation or evaluation failed.
    Error {
        /// The original expression, trimmed.
        expression: String,
        /// The postfix notation, if conversion got that far.
        #[serde(skip_serializing_if = "Option::is_none")]
        postfix: Option<String>,
        /// Error message to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// Get the postfix notation, available unless validation or conversion failed.
    pub fn postfix(&self) -> Option<&str> {
        match self {
            Self::Success { postfix, .. } => Some(postfix),
            Self::Error { postfix, .. } => postfix.as_deref(),
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success { display_result, .. } => Some(display_result),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate an expression into a [`CalcResult`]. Never fails.
pub fn evaluate_expression(input: &str, precision: Option<usize>) -> CalcResult {
    let expression = input.trim().to_string();

    let tokens = match validate(&expression).and_then(|()| convert(&expression)) {
        Ok(tokens) => tokens,
        Err(e) => return failed(expression, None, e),
    };
    let postfix = render_postfix(&tokens);

    match evaluate_postfix(&tokens) {
        Ok(value) => CalcResult::Success {
            display_result: format_value(value, precision),
            expression,
            postfix,
            value,
        },
        Err(e) => failed(expression, Some(postfix), e),
    }
}

/// Evaluate postfix text such as `3 4 + 2 *` into a [`CalcResult`].
pub fn evaluate_postfix_text(input: &str, precision: Option<usize>) -> CalcResult {
    let expression = input.trim().to_string();

    let tokens = match parse_postfix(&expression) {
        Ok(tokens) => tokens,
        Err(e) => return failed(expression, None, e),
    };
    let postfix = render_postfix(&tokens);

    match evaluate_postfix(&tokens) {
        Ok(value) => CalcResult::Success {
            display_result: format_value(value, precision),
            expression,
            postfix,
            value,
        },
        Err(e) => failed(expression, Some(postfix), e),
    }
}

fn serialize_value<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&format_value(*value, None))
    }
}

fn failed(expression: String, postfix: Option<String>, error: CalcError) -> CalcResult {
    debug!(expression, error = %error, "evaluation failed");
    CalcResult::Error {
        expression,
        postfix,
        message: error.to_string(),
    }
}

/// Format a number for display.
///
/// Integral values below 1e15 print without a fractional part. With a
/// precision, fixed decimals are printed and trailing zeros trimmed.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let s = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return s.to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        // Avoid printing "-0".
        return format!("{}", value as i64);
    }

    match precision {
        Some(places) => {
            let formatted = format!("{:.*}", places, value);
            let trimmed = if formatted.contains('.') {
                formatted.trim_end_matches('0').trim_end_matches('.')
            } else {
                &formatted
            };
            match trimmed {
                "-0" => "0".to_string(),
                s => s.to_string(),
            }
        }
        None => format!("{}", value),
    }
}
