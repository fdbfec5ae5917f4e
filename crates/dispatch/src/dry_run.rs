//! Dry-run submitter: builds the transaction payload and stops there.
//!
//! No signature, no network. The returned hash is a local placeholder
//! prefixed with `dryrun:` so it can never be mistaken for a ledger hash.

use async_trait::async_trait;
use ledgercalc_core::{AccountRef, DispatchRequest, Submission, SubmissionError, Submitter};
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSubmitter;

#[async_trait]
impl Submitter for DryRunSubmitter {
    fn name(&self) -> &str {
        "dry_run"
    }

    async fn submit(
        &self,
        request: &DispatchRequest,
        account: &AccountRef,
    ) -> Result<Submission, SubmissionError> {
        let payload = request.entry_function_payload();
        info!(sender = %account, payload = %payload, "Dry run: transaction built, not submitted");

        Ok(Submission {
            tx_hash: format!("dryrun:{}", uuid::Uuid::new_v4().simple()),
            result: None,
        })
    }
}
