//! The operation dispatcher.
//!
//! Maps an operator to `<module_id>::<operation>`, builds the request with
//! the two operands as opaque strings, and delegates to a `Submitter`.
//! Submitter failures stop here: they are logged, published on the event
//! bus and returned as `DispatchError`, never panics. No timeout is
//! applied here; bounding a submission is the submitter's job.

use std::sync::Arc;

use chrono::Utc;
use ledgercalc_core::event::{DomainEvent, EventBus};
use ledgercalc_core::{
    AccountProvider, AccountRef, DispatchError, DispatchId, DispatchOutcome, DispatchRequest,
    FunctionNaming, OperatorToken, ParsedOperation, Submitter,
};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::handle::DispatchHandle;

pub struct OperationDispatcher {
    /// Transaction construction & submission service
    submitter: Arc<dyn Submitter>,

    /// Connected signer lookup
    accounts: Arc<dyn AccountProvider>,

    /// `<module_address>::<module_name>`
    module_id: String,

    naming: FunctionNaming,

    event_bus: Arc<EventBus>,
}

impl OperationDispatcher {
    pub fn new(
        submitter: Arc<dyn Submitter>,
        accounts: Arc<dyn AccountProvider>,
        module_id: impl Into<String>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            submitter,
            accounts,
            module_id: module_id.into(),
            naming: FunctionNaming::Symbol,
            event_bus,
        }
    }

    /// Choose how operators become operation names.
    pub fn with_naming(mut self, naming: FunctionNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn submitter_name(&self) -> &str {
        self.submitter.name()
    }

    /// Fully qualified entry function for `operator`.
    pub fn function_name(&self, operator: OperatorToken) -> String {
        format!("{}::{}", self.module_id, operator.operation_name(self.naming))
    }

    pub fn build_request(&self, op: &ParsedOperation, operator: OperatorToken) -> DispatchRequest {
        DispatchRequest {
            function_name: self.function_name(operator),
            arguments: [op.operand1.clone(), op.operand2.clone()],
        }
    }

    /// Dispatch on behalf of the currently connected account.
    pub async fn dispatch(
        &self,
        op: &ParsedOperation,
        operator: OperatorToken,
    ) -> Result<DispatchOutcome, DispatchError> {
        let account = self.accounts.current();
        self.dispatch_as(DispatchId::new(), op, operator, account.as_ref())
            .await
    }

    /// Dispatch on behalf of `account`. Without an account nothing is sent
    /// and the outcome is `Skipped`.
    pub async fn dispatch_as(
        &self,
        id: DispatchId,
        op: &ParsedOperation,
        operator: OperatorToken,
        account: Option<&AccountRef>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some(account) = account else {
            debug!(dispatch_id = %id, "No active signer, skipping dispatch");
            self.publish_completed(id, "skipped");
            return Ok(DispatchOutcome::Skipped {
                id,
                reason: "no active signer".into(),
            });
        };

        let request = self.build_request(op, operator);
        info!(
            dispatch_id = %id,
            function = %request.function_name,
            sender = %account,
            submitter = self.submitter.name(),
            "Dispatching operation"
        );
        self.event_bus.publish(DomainEvent::DispatchStarted {
            id,
            function: request.function_name.clone(),
            timestamp: Utc::now(),
        });

        let submitted = self.submitter.submit(&request, account).await;

        match submitted {
            Ok(submission) => {
                info!(dispatch_id = %id, tx_hash = %submission.tx_hash, "Dispatch submitted");
                self.publish_completed(id, "submitted");
                Ok(DispatchOutcome::Submitted {
                    id,
                    request,
                    submission,
                })
            }
            Err(source) => {
                warn!(dispatch_id = %id, function = %request.function_name, "Submission failed: {source}");
                self.event_bus.publish(DomainEvent::DispatchFailed {
                    id,
                    error_message: source.to_string(),
                    timestamp: Utc::now(),
                });
                Err(DispatchError::SubmissionFailure {
                    function: request.function_name,
                    source,
                })
            }
        }
    }

    /// Run a dispatch on the tokio runtime. The returned handle can be
    /// awaited or cancelled; the caller keeps processing input meanwhile.
    pub fn spawn(self: &Arc<Self>, op: ParsedOperation, operator: OperatorToken) -> DispatchHandle {
        let id = DispatchId::new();
        let account = self.accounts.current();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let dispatcher = Arc::clone(self);

        let join = tokio::spawn(async move {
            tokio::select! {
                result = dispatcher.dispatch_as(id, &op, operator, account.as_ref()) => result,
                // A dropped handle closes the channel; only an explicit
                // cancel matches.
                Ok(()) = cancel_rx => {
                    info!(dispatch_id = %id, "Dispatch cancelled");
                    dispatcher.publish_completed(id, "cancelled");
                    Ok(DispatchOutcome::Cancelled { id })
                }
            }
        });

        DispatchHandle::new(id, cancel_tx, join)
    }

    fn publish_completed(&self, id: DispatchId, status: &str) {
        self.event_bus.publish(DomainEvent::DispatchCompleted {
            id,
            status: status.into(),
            timestamp: Utc::now(),
        });
    }
}
