//! # ledgercalc core
//!
//! Domain types, traits, and error definitions for the ledgercalc
//! calculator. Arithmetic is never evaluated locally: a parsed expression
//! becomes a remote entry-function call on a deployed Move module.
//!
//! This crate has no I/O. It defines:
//! - the input state (`ExpressionBuffer`, `ActivationGate`)
//! - the grammar (`OperatorToken`, `parse`)
//! - the dispatch boundary (`DispatchRequest`, `Submitter`, `AccountProvider`)
//!
//! Implementations of the boundary traits live in `ledgercalc-dispatch`.

pub mod buffer;
pub mod error;
pub mod event;
pub mod gate;
pub mod operator;
pub mod parser;
pub mod request;
pub mod submitter;

// Re-export key types at crate root for ergonomics
pub use buffer::ExpressionBuffer;
pub use error::{DispatchError, ParseFailure, SubmissionError};
pub use event::{DomainEvent, EventBus};
pub use gate::ActivationGate;
pub use operator::{FunctionNaming, OperatorToken};
pub use parser::{ParseOptions, ParsedOperation, parse, parse_with};
pub use request::{AccountRef, DispatchId, DispatchOutcome, DispatchRequest, Submission};
pub use submitter::{AccountProvider, StaticAccount, Submitter};
