//! Submitter and account traits — the external collaborators of the
//! Operation Dispatcher.
//!
//! A `Submitter` builds, signs, and submits a transaction for a
//! `DispatchRequest`. An `AccountProvider` reports the connected signer.
//! Implementations: HTTP signing relay, dry run (see `ledgercalc-dispatch`).

use async_trait::async_trait;

use crate::error::SubmissionError;
use crate::request::{AccountRef, DispatchRequest, Submission};

#[async_trait]
pub trait Submitter: Send + Sync {
    /// Human-readable name (e.g., "relay", "dry_run").
    fn name(&self) -> &str;

    /// Build, sign and submit `request` on behalf of `account`.
    async fn submit(
        &self,
        request: &DispatchRequest,
        account: &AccountRef,
    ) -> std::result::Result<Submission, SubmissionError>;
}

/// Source of the currently connected signer, if any.
pub trait AccountProvider: Send + Sync {
    fn current(&self) -> Option<AccountRef>;
}

/// A fixed account (or none), typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticAccount(Option<AccountRef>);

impl StaticAccount {
    pub fn new(account: Option<AccountRef>) -> Self {
        Self(account)
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl AccountProvider for StaticAccount {
    fn current(&self) -> Option<AccountRef> {
        self.0.clone()
    }
}
