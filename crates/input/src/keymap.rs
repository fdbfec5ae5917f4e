//! Physical keyboard mapping.
//!
//! | Key            | Command                |
//! |----------------|------------------------|
//! | `0`–`9`        | append digit           |
//! | `+ - * /`      | append spaced operator |
//! | `Backspace`    | delete last            |
//! | `Enter`        | equals                 |
//! | `c` / `C`      | clear                  |
//!
//! Everything else is ignored.

use ledgercalc_core::OperatorToken;

use crate::event::{Command, Key};

pub fn command_for_key(key: &Key) -> Option<Command> {
    match key {
        Key::Char(c) if c.is_ascii_digit() => Some(Command::AppendDigit(*c)),
        Key::Char('c' | 'C') => Some(Command::Clear),
        Key::Char('+') => Some(Command::AppendOperator(OperatorToken::Add)),
        Key::Char('-') => Some(Command::AppendOperator(OperatorToken::Subtract)),
        Key::Char('*') => Some(Command::AppendOperator(OperatorToken::Multiply)),
        Key::Char('/') => Some(Command::AppendOperator(OperatorToken::Divide)),
        Key::Backspace => Some(Command::Delete),
        Key::Enter => Some(Command::Equals),
        Key::Char(_) | Key::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_append() {
        for c in '0'..='9' {
            assert_eq!(command_for_key(&Key::Char(c)), Some(Command::AppendDigit(c)));
        }
    }

    #[test]
    fn operators_map() {
        assert_eq!(
            command_for_key(&Key::Char('*')),
            Some(Command::AppendOperator(OperatorToken::Multiply))
        );
        assert_eq!(
            command_for_key(&Key::Char('-')),
            Some(Command::AppendOperator(OperatorToken::Subtract))
        );
    }

    #[test]
    fn clear_is_case_insensitive() {
        assert_eq!(command_for_key(&Key::Char('c')), Some(Command::Clear));
        assert_eq!(command_for_key(&Key::Char('C')), Some(Command::Clear));
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for_key(&Key::Backspace), Some(Command::Delete));
        assert_eq!(command_for_key(&Key::Enter), Some(Command::Equals));
    }

    #[test]
    fn unmapped_keys_ignored() {
        assert_eq!(command_for_key(&Key::Char('.')), None);
        assert_eq!(command_for_key(&Key::Char('^')), None);
        assert_eq!(command_for_key(&Key::Char('=')), None);
        assert_eq!(command_for_key(&Key::Other("ArrowUp".into())), None);
    }
}
