//! Expression parser.
//!
//! The accepted grammar is exactly `operand operator operand`, three
//! whitespace-separated non-empty tokens. Operands are opaque strings: the
//! remote module is the authority on numeric semantics. Strict mode adds a
//! local decimal check on top of the grammar, never instead of it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseFailure;
use crate::operator::OperatorToken;

/// A successfully decomposed expression. Built on demand at dispatch time
/// and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOperation {
    pub operand1: String,
    pub operator: OperatorToken,
    pub operand2: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Require both operands to be decimal numbers.
    #[serde(default)]
    pub strict_operands: bool,
}

/// Parse with default (non-strict) options.
pub fn parse(expr: &str) -> Result<ParsedOperation, ParseFailure> {
    parse_with(expr, ParseOptions::default())
}

pub fn parse_with(expr: &str, options: ParseOptions) -> Result<ParsedOperation, ParseFailure> {
    let tokens: Vec<&str> = expr.split_whitespace().collect();

    let [operand1, operator, operand2] = tokens.as_slice() else {
        debug!(found = tokens.len(), "Rejecting expression with wrong token count");
        return Err(ParseFailure::WrongTokenCount { found: tokens.len() });
    };

    if operand1.is_empty() || operator.is_empty() || operand2.is_empty() {
        return Err(ParseFailure::EmptyToken);
    }

    let operator = OperatorToken::from_symbol(operator)
        .filter(|op| op.is_arithmetic())
        .ok_or_else(|| ParseFailure::UnknownOperator((*operator).to_string()))?;

    if options.strict_operands {
        for operand in [operand1, operand2] {
            if !is_decimal(operand) {
                return Err(ParseFailure::InvalidOperand((*operand).to_string()));
            }
        }
    }

    Ok(ParsedOperation {
        operand1: (*operand1).to_string(),
        operator,
        operand2: (*operand2).to_string(),
    })
}

/// Digits with at most one decimal point and at least one digit.
fn is_decimal(s: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}
