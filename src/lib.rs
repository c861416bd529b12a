//! Infix arithmetic evaluation built on the shunting-yard algorithm.
//!
//! ```
//! assert_eq!(rpncalc::evaluate("2 + 3 * 4"), Ok(14.0));
//!
//! let postfix = rpncalc::to_postfix("-(3 + 5)").unwrap();
//! assert_eq!(rpncalc::render_postfix(&postfix), "0 3 5 + -");
//! ```

pub mod calculator;
pub mod config;
pub mod history;
pub mod repl;

pub use calculator::{
    CalcError, CalcResult, Operator, Token, evaluate, evaluate_expression, evaluate_postfix,
    parse_postfix, render_postfix, to_postfix, validate,
};
