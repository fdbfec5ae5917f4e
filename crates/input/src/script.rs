//! Button scripts: a whitespace-separated list of keypad labels.
//!
//! `"12 + 30 ="` presses `1`, `2`, `+`, `3`, `0`, `=`. Runs of digits and
//! decimal points expand to one press per character; every other token
//! must be a single keypad label (see `Button::from_label`).

use crate::event::Button;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown button {label:?} at position {position}")]
    UnknownButton { label: String, position: usize },
}

pub fn parse_script(script: &str) -> Result<Vec<Button>, ScriptError> {
    let mut buttons = Vec::new();

    for (position, label) in script.split_whitespace().enumerate() {
        if let Some(button) = Button::from_label(label) {
            buttons.push(button);
            continue;
        }

        if label.chars().all(|c| c.is_ascii_digit() || c == '.') {
            buttons.extend(label.chars().map(Button::Digit));
            continue;
        }

        return Err(ScriptError::UnknownButton {
            label: label.to_string(),
            position,
        });
    }

    Ok(buttons)
}
