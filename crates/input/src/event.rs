//! Input event and command types.

use ledgercalc_core::OperatorToken;
use serde::{Deserialize, Serialize};

/// An on-screen calculator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// `0`–`9` or `.`
    Digit(char),
    Operator(OperatorToken),
    Delete,
    Clear,
    Equals,
}

impl Button {
    /// The face of a button as written in scripts and labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "C" | "c" => Some(Self::Clear),
            "<-" | "←" | "DEL" | "del" => Some(Self::Delete),
            "=" => Some(Self::Equals),
            // Keypad glyphs
            "^" => Some(Self::Operator(OperatorToken::Power)),
            "x" => Some(Self::Operator(OperatorToken::Multiply)),
            "÷" => Some(Self::Operator(OperatorToken::Divide)),
            _ => {
                if let Some(op) = OperatorToken::from_symbol(label).filter(|op| op.is_arithmetic()) {
                    return Some(Self::Operator(op));
                }
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() || c == '.' => Some(Self::Digit(c)),
                    _ => None,
                }
            }
        }
    }
}

/// A physical key press, already stripped of terminal specifics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    /// Any other named key (e.g. "ArrowUp")
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Button(Button),
    Key(Key),
}

/// Events a front end feeds into a `Session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Input(InputEvent),
    /// Explicit user toggle of the activation gate
    ToggleActivation,
    /// Stop the session, cancelling in-flight dispatches
    Quit,
}

/// What the router does with an accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AppendDigit(char),
    AppendOperator(OperatorToken),
    Delete,
    Clear,
    Equals,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Digit(c) => Command::AppendDigit(c),
            Button::Operator(OperatorToken::Equals) | Button::Equals => Command::Equals,
            Button::Operator(op) => Command::AppendOperator(op),
            Button::Delete => Command::Delete,
            Button::Clear => Command::Clear,
        }
    }
}
