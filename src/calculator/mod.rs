//! Calculator module for evaluating infix arithmetic expressions.
//!
//! This module provides functionality to:
//! - Validate input (allowed characters, balanced parentheses)
//! - Convert infix to postfix with the shunting-yard algorithm
//! - Evaluate postfix sequences
//! - Copy results to the clipboard

mod clipboard;
mod error;
mod evaluation;
mod postfix;
mod token;
mod validation;

pub use clipboard::copy_to_clipboard;
pub use error::CalcError;
pub use evaluation::{
    CalcResult, evaluate, evaluate_expression, evaluate_postfix, evaluate_postfix_text, format_value,
};
pub use postfix::to_postfix;
pub use token::{Operator, Token, parse_postfix, render_postfix};
pub use validation::{has_balanced_parentheses, is_valid_expression, validate};
