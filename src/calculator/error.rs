//! Errors raised while validating, converting or evaluating an expression.

use thiserror::Error;

/// Everything that can go wrong with a single expression.
///
/// Every variant aborts the current evaluation; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// An operator was reached with fewer than two values on the stack.
    /// `'='` marks a sequence that produced no value at all.
    #[error("Stack underflow: '{operator}' is missing an operand")]
    StackUnderflow { operator: char },

    #[error("Malformed expression: {count} values left without an operator")]
    LeftoverOperands { count: usize },
}
