//! Operator tokens and their remote operation names.

use serde::{Deserialize, Serialize};

/// The closed operator alphabet.
///
/// `Equals` is the trigger that parses the buffer and dispatches; the other
/// five are binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorToken {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Equals,
}

/// How an operator becomes the final segment of the remote function id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionNaming {
    /// Pass the raw symbol through (`+`, `**`, `=`).
    #[default]
    Symbol,
    /// Use identifier names (`add`, `power`, `equals`).
    Named,
}

impl OperatorToken {
    /// Binary operators that may appear between two operands.
    pub const ARITHMETIC: [OperatorToken; 5] = [
        OperatorToken::Add,
        OperatorToken::Subtract,
        OperatorToken::Multiply,
        OperatorToken::Divide,
        OperatorToken::Power,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "**" => Some(Self::Power),
            "=" => Some(Self::Equals),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
            Self::Equals => "=",
        }
    }

    /// Identifier form, for modules whose entry functions must be valid
    /// Move identifiers.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Equals => "equals",
        }
    }

    pub fn operation_name(self, naming: FunctionNaming) -> &'static str {
        match naming {
            FunctionNaming::Symbol => self.symbol(),
            FunctionNaming::Named => self.identifier(),
        }
    }

    pub fn is_arithmetic(self) -> bool {
        self != Self::Equals
    }

    /// Text appended to the buffer for this operator: single-space
    /// delimited so the parser can split unambiguously.
    pub fn buffer_token(self) -> String {
        format!(" {} ", self.symbol())
    }
}

impl std::fmt::Display for OperatorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
