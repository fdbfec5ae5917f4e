//! The calculator controller and input router.
//!
//! `Calculator` is the single owner of the expression buffer, the
//! activation gate and the result display. Every raw event goes through
//! `handle`, which checks the gate, translates the event into a `Command`
//! and routes it. Equals parses the buffer and, on success, hands back a
//! `PendingDispatch` for the caller to run; the outcome returns through
//! `complete`.

use std::sync::Arc;

use chrono::Utc;
use ledgercalc_core::event::{DomainEvent, EventBus};
use ledgercalc_core::{
    ActivationGate, DispatchError, DispatchOutcome, ExpressionBuffer, ParseFailure, ParseOptions,
    ParsedOperation, parse_with,
};
use tracing::{debug, info, trace};

use crate::event::{Command, InputEvent};
use crate::keymap;

/// Where the calculator is in its input → dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcState {
    /// Empty buffer, nothing in flight
    Idle,
    /// Buffer has content, nothing in flight
    Accumulating,
    /// At least one dispatch outstanding (input still accepted)
    Dispatching,
}

/// A parsed expression ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDispatch {
    /// Buffer contents at the time Equals was pressed
    pub expression: String,
    pub operation: ParsedOperation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Gate closed or unmapped key
    Ignored,
    /// Buffer mutated
    Updated,
    /// Equals on a malformed expression; buffer left as is
    Rejected(ParseFailure),
    Dispatch(PendingDispatch),
}

pub struct Calculator {
    buffer: ExpressionBuffer,
    gate: ActivationGate,
    result: Option<String>,
    status: Option<String>,
    in_flight: usize,
    parse_options: ParseOptions,
    clear_on_success: bool,
    event_bus: Arc<EventBus>,
}

impl Calculator {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            gate: ActivationGate::new(),
            result: None,
            status: None,
            in_flight: 0,
            parse_options: ParseOptions::default(),
            clear_on_success: true,
            event_bus,
        }
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Whether a successful dispatch clears the (unchanged) buffer.
    pub fn with_clear_on_success(mut self, enabled: bool) -> Self {
        self.clear_on_success = enabled;
        self
    }

    // --- Read side (presentation layer) ---

    pub fn expression(&self) -> &str {
        self.buffer.current()
    }

    /// Buffer as shown on screen (`"0"` when empty).
    pub fn display(&self) -> &str {
        self.buffer.display()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    pub fn state(&self) -> CalcState {
        if self.in_flight > 0 {
            CalcState::Dispatching
        } else if self.buffer.is_empty() {
            CalcState::Idle
        } else {
            CalcState::Accumulating
        }
    }

    // --- Write side ---

    /// Explicit user toggle of the activation gate.
    pub fn toggle(&mut self) -> bool {
        let active = self.gate.toggle();
        info!(active, "Activation toggled");
        self.event_bus.publish(DomainEvent::GateToggled {
            active,
            timestamp: Utc::now(),
        });
        active
    }

    /// Route a raw button or key event.
    pub fn handle(&mut self, event: InputEvent) -> RouteOutcome {
        let command = match &event {
            InputEvent::Button(button) => Some(Command::from(*button)),
            InputEvent::Key(key) => keymap::command_for_key(key),
        };
        match command {
            Some(command) => self.route(command),
            None => {
                trace!(?event, "Unmapped input");
                RouteOutcome::Ignored
            }
        }
    }

    /// Apply one command. The only place input is gated.
    pub fn route(&mut self, command: Command) -> RouteOutcome {
        if !self.gate.is_active() {
            trace!(?command, "Gate closed, ignoring input");
            return RouteOutcome::Ignored;
        }

        match command {
            Command::AppendDigit(c) => {
                let mut buf = [0; 4];
                self.buffer.append(c.encode_utf8(&mut buf));
            }
            Command::AppendOperator(op) => self.buffer.append(&op.buffer_token()),
            Command::Delete => self.buffer.delete_last(),
            Command::Clear => {
                self.buffer.clear();
                self.status = None;
            }
            Command::Equals => return self.prepare_dispatch(),
        }

        self.event_bus.publish(DomainEvent::InputAccepted {
            expression: self.buffer.current().to_string(),
            timestamp: Utc::now(),
        });
        RouteOutcome::Updated
    }

    fn prepare_dispatch(&mut self) -> RouteOutcome {
        let expression = self.buffer.current().to_string();
        match parse_with(&expression, self.parse_options) {
            Ok(operation) => {
                debug!(%expression, "Expression parsed, dispatching");
                self.in_flight += 1;
                self.status = Some("dispatching…".into());
                RouteOutcome::Dispatch(PendingDispatch {
                    expression,
                    operation,
                })
            }
            Err(failure) => {
                debug!(%expression, "Parse rejected: {failure}");
                self.status = Some(failure.to_string());
                self.event_bus.publish(DomainEvent::ParseRejected {
                    expression,
                    reason: failure.to_string(),
                    timestamp: Utc::now(),
                });
                RouteOutcome::Rejected(failure)
            }
        }
    }

    /// Apply the outcome of a dispatch started from `expression`.
    ///
    /// On success the result display is populated and the buffer cleared
    /// if it still holds `expression`. On any other outcome the buffer and
    /// gate are left untouched.
    pub fn complete(
        &mut self,
        expression: &str,
        outcome: Result<DispatchOutcome, DispatchError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(DispatchOutcome::Submitted { submission, .. }) => {
                self.result = Some(submission.display_value().to_string());
                self.status = None;
                if self.clear_on_success && self.buffer.current() == expression {
                    self.buffer.clear();
                }
            }
            Ok(DispatchOutcome::Skipped { reason, .. }) => {
                self.status = Some(format!("not sent: {reason}"));
            }
            Ok(DispatchOutcome::Cancelled { .. }) => {
                self.status = Some("dispatch cancelled".into());
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Arc::new(EventBus::default()))
    }
}
