//! Activation gate.
//!
//! Input capture is opt-in: until the user turns the calculator on, no
//! key press or button reaches the buffer. Starts inactive.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationGate {
    active: bool,
}

impl ActivationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the gate. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
