//! Handle to an in-flight dispatch.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use ledgercalc_core::{DispatchError, DispatchId, DispatchOutcome};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Awaitable, cancellable dispatch.
///
/// Dropping the handle does not cancel the dispatch; it keeps running
/// detached.
#[derive(Debug)]
pub struct DispatchHandle {
    id: DispatchId,
    cancel: Option<oneshot::Sender<()>>,
    join: JoinHandle<Result<DispatchOutcome, DispatchError>>,
}

impl DispatchHandle {
    pub(crate) fn new(
        id: DispatchId,
        cancel: oneshot::Sender<()>,
        join: JoinHandle<Result<DispatchOutcome, DispatchError>>,
    ) -> Self {
        Self {
            id,
            cancel: Some(cancel),
            join,
        }
    }

    pub fn id(&self) -> DispatchId {
        self.id
    }

    /// Request cancellation. Returns `false` if already cancelled or the
    /// dispatch has finished.
    pub fn cancel(&mut self) -> bool {
        self.cancel
            .take()
            .is_some_and(|tx| tx.send(()).is_ok())
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

impl Future for DispatchHandle {
    type Output = Result<DispatchOutcome, DispatchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.join).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Panicked or aborted task
            Poll::Ready(Err(e)) => Poll::Ready(Err(DispatchError::Aborted(e.to_string()))),
        }
    }
}
