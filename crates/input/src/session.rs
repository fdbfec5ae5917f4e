//! A running calculator session.
//!
//! One task owns the `Calculator`. It selects over front-end events and
//! completed dispatches, so typing continues while submissions are in
//! flight. Quitting cancels every outstanding dispatch and waits for the
//! cancellations to land.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use ledgercalc_core::{DispatchError, DispatchOutcome};
use ledgercalc_dispatch::{DispatchHandle, OperationDispatcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::calculator::{Calculator, RouteOutcome};
use crate::event::{InputEvent, SessionEvent};

/// Presentation layer: redrawn after every state change.
pub trait View {
    fn render(&mut self, calculator: &Calculator);
}

/// Renders nothing.
#[derive(Debug, Default)]
pub struct NullView;

impl View for NullView {
    fn render(&mut self, _calculator: &Calculator) {}
}

/// A dispatch tagged with the expression it was started from.
struct InFlight {
    expression: String,
    handle: DispatchHandle,
}

impl Future for InFlight {
    type Output = (String, Result<DispatchOutcome, DispatchError>);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.handle)
            .poll(cx)
            .map(|outcome| (std::mem::take(&mut this.expression), outcome))
    }
}

pub struct Session {
    calculator: Calculator,
    dispatcher: Arc<OperationDispatcher>,
    in_flight: FuturesUnordered<InFlight>,
}

impl Session {
    pub fn new(calculator: Calculator, dispatcher: Arc<OperationDispatcher>) -> Self {
        Self {
            calculator,
            dispatcher,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Explicit toggle of the activation gate.
    pub fn toggle(&mut self) -> bool {
        self.calculator.toggle()
    }

    /// Route one input event, starting a dispatch on Equals.
    pub fn handle_input(&mut self, event: InputEvent) -> RouteOutcome {
        let outcome = self.calculator.handle(event);
        if let RouteOutcome::Dispatch(pending) = &outcome {
            let handle = self
                .dispatcher
                .spawn(pending.operation.clone(), pending.operation.operator);
            debug!(dispatch_id = %handle.id(), expression = %pending.expression, "Dispatch started");
            self.in_flight.push(InFlight {
                expression: pending.expression.clone(),
                handle,
            });
        }
        outcome
    }

    /// Cancel all outstanding dispatches. Returns how many were signalled.
    pub fn cancel_all(&mut self) -> usize {
        self.in_flight
            .iter_mut()
            .map(|flight| flight.handle.cancel())
            .filter(|signalled| *signalled)
            .count()
    }

    /// Wait for every outstanding dispatch and apply its outcome.
    pub async fn finish(&mut self) {
        while let Some((expression, outcome)) = self.in_flight.next().await {
            self.calculator.complete(&expression, outcome);
        }
    }

    /// Process events until the front end quits (or closes the channel)
    /// and every dispatch has finished.
    pub async fn run<V: View>(&mut self, mut events: mpsc::Receiver<SessionEvent>, view: &mut V) {
        let mut input_open = true;
        view.render(&self.calculator);

        loop {
            tokio::select! {
                event = events.recv(), if input_open => match event {
                    Some(SessionEvent::Input(input)) => {
                        self.handle_input(input);
                    }
                    Some(SessionEvent::ToggleActivation) => {
                        self.toggle();
                    }
                    Some(SessionEvent::Quit) => {
                        let cancelled = self.cancel_all();
                        info!(cancelled, "Session quitting");
                        input_open = false;
                    }
                    None => {
                        debug!(pending = self.in_flight.len(), "Input closed, draining dispatches");
                        input_open = false;
                    }
                },
                Some((expression, outcome)) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.calculator.complete(&expression, outcome);
                }
                else => break,
            }
            view.render(&self.calculator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;
    use async_trait::async_trait;
    use ledgercalc_core::event::EventBus;
    use ledgercalc_core::{
        AccountRef, DispatchRequest, StaticAccount, Submission, SubmissionError, Submitter,
    };
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Holds every submission until `release` is notified.
    struct GatedSubmitter {
        release: Arc<Notify>,
        seen: Mutex<Vec<DispatchRequest>>,
    }

    #[async_trait]
    impl Submitter for GatedSubmitter {
        fn name(&self) -> &str {
            "gated"
        }

        async fn submit(
            &self,
            request: &DispatchRequest,
            _account: &AccountRef,
        ) -> Result<Submission, SubmissionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.release.notified().await;
            Ok(Submission {
                tx_hash: "0x99".into(),
                result: Some("12".into()),
            })
        }
    }

    /// Records what the calculator looked like on each render.
    #[derive(Default)]
    struct Snapshots(Vec<(String, Option<String>)>);

    impl View for Snapshots {
        fn render(&mut self, calculator: &Calculator) {
            self.0.push((
                calculator.display().to_string(),
                calculator.result().map(str::to_string),
            ));
        }
    }

    fn session(submitter: Arc<dyn Submitter>) -> Session {
        let bus = Arc::new(EventBus::default());
        let dispatcher = Arc::new(OperationDispatcher::new(
            submitter,
            Arc::new(StaticAccount::new(Some(AccountRef::new("0xabc")))),
            "0xa1::calculator",
            bus.clone(),
        ));
        Session::new(Calculator::new(bus), dispatcher)
    }

    fn keys(s: &str) -> Vec<SessionEvent> {
        s.chars()
            .map(|c| {
                let key = match c {
                    '\n' => Key::Enter,
                    c => Key::Char(c),
                };
                SessionEvent::Input(InputEvent::Key(key))
            })
            .collect()
    }

    #[tokio::test]
    async fn input_continues_while_dispatch_in_flight() {
        let release = Arc::new(Notify::new());
        let submitter = Arc::new(GatedSubmitter {
            release: release.clone(),
            seen: Mutex::new(vec![]),
        });
        let mut session = session(submitter.clone());
        session.calculator.toggle();

        for event in keys("7+5\n") {
            if let SessionEvent::Input(input) = event {
                session.handle_input(input);
            }
        }
        assert_eq!(session.in_flight(), 1);

        // Typing is not blocked by the outstanding dispatch
        session.handle_input(InputEvent::Key(Key::Char('3')));
        assert_eq!(session.calculator().expression(), "7 + 53");

        release.notify_one();
        session.finish().await;
        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.calculator().result(), Some("12"));
        assert_eq!(submitter.seen.lock().unwrap()[0].function_name, "0xa1::calculator::+");
    }

    #[tokio::test]
    async fn run_drains_dispatches_after_input_closes() {
        let release = Arc::new(Notify::new());
        let submitter = Arc::new(GatedSubmitter {
            release: release.clone(),
            seen: Mutex::new(vec![]),
        });
        let mut session = session(submitter);

        let (tx, rx) = mpsc::channel(32);
        tx.send(SessionEvent::ToggleActivation).await.unwrap();
        for event in keys("7+5\n") {
            tx.send(event).await.unwrap();
        }
        drop(tx);
        // Permit is stored until the submitter waits on it
        release.notify_one();

        let mut view = Snapshots::default();
        session.run(rx, &mut view).await;

        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.calculator().result(), Some("12"));
        assert_eq!(session.calculator().display(), "0");
        assert_eq!(view.0.first().unwrap().0, "0");
        assert_eq!(view.0.last().unwrap(), &("0".to_string(), Some("12".to_string())));
    }

    #[tokio::test]
    async fn quit_cancels_outstanding_dispatches() {
        let submitter = Arc::new(GatedSubmitter {
            release: Arc::new(Notify::new()),
            seen: Mutex::new(vec![]),
        });
        let mut session = session(submitter);

        let (tx, rx) = mpsc::channel(32);
        tx.send(SessionEvent::ToggleActivation).await.unwrap();
        for event in keys("2*3\n") {
            tx.send(event).await.unwrap();
        }
        tx.send(SessionEvent::Quit).await.unwrap();

        session.run(rx, &mut NullView).await;

        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.calculator().status(), Some("dispatch cancelled"));
        assert_eq!(session.calculator().expression(), "2 * 3");
        drop(tx);
    }

    #[tokio::test]
    async fn malformed_expression_never_dispatches() {
        let submitter = Arc::new(GatedSubmitter {
            release: Arc::new(Notify::new()),
            seen: Mutex::new(vec![]),
        });
        let mut session = session(submitter.clone());
        session.calculator.toggle();

        for event in keys("12\n") {
            if let SessionEvent::Input(input) = event {
                session.handle_input(input);
            }
        }
        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.calculator().expression(), "12");
        assert!(submitter.seen.lock().unwrap().is_empty());
    }
}
