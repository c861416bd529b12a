//! Tokens shared by the converter and the evaluator.

use std::fmt;
use std::str::FromStr;

use super::error::CalcError;

/// One of the five binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Map an operator character to its operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    /// The character this operator is written as.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    /// Binding strength. Everything is left-associative, `^` included.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Power => 3,
            Self::Multiply | Self::Divide => 2,
            Self::Add | Self::Subtract => 1,
        }
    }

    /// Apply the operator to `a` (left operand) and `b` (right operand).
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(a / b),
            Self::Power => Ok(a.powf(b)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A postfix token: a number literal or an operator.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number {
        value: f64,
        /// The literal as it was typed, used when rendering.
        text: String,
    },
    Operator(Operator),
}

impl Token {
    /// Build a number token from a literal, failing if it is not a valid number.
    pub fn number(text: &str) -> Result<Self, CalcError> {
        text.parse::<f64>()
            .map(|value| Self::Number {
                value,
                text: text.to_string(),
            })
            .map_err(|_| CalcError::InvalidExpression(format!("malformed number '{}'", text)))
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { text, .. } => f.write_str(text),
            Self::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl FromStr for Token {
    type Err = CalcError;

    /// Parse a single token-string as found in postfix text.
    ///
    /// Numbers follow the same grammar as infix input: digits and `.` only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Self::number(s);
        }

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(op) = Operator::from_char(c)
        {
            return Ok(Self::Operator(op));
        }

        Err(CalcError::UnknownOperator(s.to_string()))
    }
}

/// Render a postfix sequence as space-separated token-strings.
pub fn render_postfix(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split postfix text on whitespace and parse each token-string.
pub fn parse_postfix(text: &str) -> Result<Vec<Token>, CalcError> {
    text.split_whitespace().map(str::parse).collect()
}
