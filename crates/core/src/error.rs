//! Error types for the ledgercalc domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each stage of the input → parse → dispatch pipeline has its own enum.
//! None of these are fatal: every failure leaves the buffer intact.

use thiserror::Error;

/// The expression in the buffer cannot be turned into a `ParsedOperation`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("expected `operand operator operand`, found {found} token(s)")]
    WrongTokenCount { found: usize },

    #[error("expression contains an empty token")]
    EmptyToken,

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("operand is not a number: {0}")]
    InvalidOperand(String),
}

/// Raised by a `Submitter` when the transaction could not be built,
/// signed, or accepted.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Submission rejected (status: {status_code}): {message}")]
    Rejected { status_code: u16, message: String },

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Submission timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Malformed submission response: {0}")]
    InvalidResponse(String),
}

/// Failures at the Operation Dispatcher boundary.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("Submission failed for {function}: {source}")]
    SubmissionFailure {
        function: String,
        #[source]
        source: SubmissionError,
    },

    #[error("Dispatch task aborted: {0}")]
    Aborted(String),
}
