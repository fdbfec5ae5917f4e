//! End-to-end tests for the calculator pipeline.
//!
//! Buttons go through the `Session`, are parsed by the `Calculator`, and
//! dispatched by a real `OperationDispatcher` to a scripted in-memory
//! submitter.

use std::sync::{Arc, Mutex};

use ledgercalc_config::AppConfig;
use ledgercalc_core::event::{DomainEvent, EventBus};
use ledgercalc_core::{
    AccountRef, DispatchRequest, FunctionNaming, ParseFailure, StaticAccount, Submission,
    SubmissionError, Submitter,
};
use ledgercalc_dispatch::OperationDispatcher;
use ledgercalc_input::{
    Calculator, InputEvent, Key, NullView, RouteOutcome, Session, SessionEvent, parse_script,
};
use tokio::sync::mpsc;

const MODULE: &str = "0xa1f27853ed078768afd4edbaa401e6f644a82cc04f797a6fd7d67c3fda98efe4::calculator";

// ── Scripted submitter ───────────────────────────────────────────────────

/// Returns scripted replies in order and records every request it sees.
struct ScriptedSubmitter {
    replies: Mutex<Vec<Result<Submission, SubmissionError>>>,
    requests: Mutex<Vec<(DispatchRequest, AccountRef)>>,
}

impl ScriptedSubmitter {
    fn new(replies: Vec<Result<Submission, SubmissionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn returning(result: &str) -> Arc<Self> {
        Self::new(vec![Ok(Submission {
            tx_hash: "0xbeef".into(),
            result: Some(result.into()),
        })])
    }

    fn requests(&self) -> Vec<(DispatchRequest, AccountRef)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Submitter for ScriptedSubmitter {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(
        &self,
        request: &DispatchRequest,
        account: &AccountRef,
    ) -> Result<Submission, SubmissionError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), account.clone()));
        let mut replies = self.replies.lock().unwrap();
        assert!(!replies.is_empty(), "ScriptedSubmitter exhausted");
        replies.remove(0)
    }
}

struct Harness {
    session: Session,
    bus: Arc<EventBus>,
}

fn harness(submitter: Arc<ScriptedSubmitter>, account: Option<&str>) -> Harness {
    harness_with(submitter, account, FunctionNaming::Symbol)
}

fn harness_with(
    submitter: Arc<ScriptedSubmitter>,
    account: Option<&str>,
    naming: FunctionNaming,
) -> Harness {
    let bus = Arc::new(EventBus::default());
    let dispatcher = OperationDispatcher::new(
        submitter,
        Arc::new(StaticAccount::new(account.map(AccountRef::new))),
        MODULE,
        bus.clone(),
    )
    .with_naming(naming);
    let session = Session::new(Calculator::new(bus.clone()), Arc::new(dispatcher));
    Harness { session, bus }
}

fn press(session: &mut Session, script: &str) -> Vec<RouteOutcome> {
    parse_script(script)
        .unwrap()
        .into_iter()
        .map(|button| session.handle_input(InputEvent::Button(button)))
        .collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn seven_plus_five_dispatches_symbolic_add() {
    let submitter = ScriptedSubmitter::returning("12");
    let mut h = harness(submitter.clone(), Some("0xabc"));
    h.session.toggle();

    press(&mut h.session, "7 + 5 =");
    assert_eq!(h.session.in_flight(), 1);
    h.session.finish().await;

    let requests = submitter.requests();
    assert_eq!(requests.len(), 1);
    let (request, account) = &requests[0];
    assert_eq!(request.function_name, format!("{MODULE}::+"));
    assert_eq!(request.arguments, ["7".to_string(), "5".to_string()]);
    assert_eq!(account.address(), "0xabc");

    let calc = h.session.calculator();
    assert_eq!(calc.result(), Some("12"));
    assert_eq!(calc.display(), "0");
}

#[tokio::test]
async fn single_operand_is_rejected_without_dispatch() {
    let submitter = ScriptedSubmitter::new(vec![]);
    let mut h = harness(submitter.clone(), Some("0xabc"));
    h.session.toggle();

    let outcomes = press(&mut h.session, "12 =");
    assert_eq!(
        outcomes.last(),
        Some(&RouteOutcome::Rejected(ParseFailure::WrongTokenCount { found: 1 }))
    );
    h.session.finish().await;

    assert!(submitter.requests().is_empty());
    assert_eq!(h.session.calculator().expression(), "12");
}

#[tokio::test]
async fn chained_expression_is_rejected_without_dispatch() {
    let submitter = ScriptedSubmitter::new(vec![]);
    let mut h = harness(submitter.clone(), Some("0xabc"));
    h.session.toggle();

    let outcomes = press(&mut h.session, "3 * 4 * 5 =");
    assert_eq!(
        outcomes.last(),
        Some(&RouteOutcome::Rejected(ParseFailure::WrongTokenCount { found: 5 }))
    );
    assert_eq!(h.session.in_flight(), 0);
    assert!(submitter.requests().is_empty());
    assert_eq!(h.session.calculator().expression(), "3 * 4 * 5");
}

#[tokio::test]
async fn no_account_sends_nothing() {
    let submitter = ScriptedSubmitter::new(vec![]);
    let mut h = harness(submitter.clone(), None);
    h.session.toggle();

    press(&mut h.session, "2 * 3 =");
    h.session.finish().await;

    assert!(submitter.requests().is_empty());
    let calc = h.session.calculator();
    assert_eq!(calc.expression(), "2 * 3");
    assert_eq!(calc.result(), None);
    assert!(calc.status().unwrap().starts_with("not sent"));
}

#[tokio::test]
async fn gate_blocks_input_when_inactive() {
    let submitter = ScriptedSubmitter::new(vec![]);
    let mut h = harness(submitter, Some("0xabc"));

    h.session.toggle();
    h.session.handle_input(InputEvent::Key(Key::Char('9')));
    assert_eq!(h.session.calculator().expression(), "9");

    h.session.toggle();
    let outcome = h.session.handle_input(InputEvent::Key(Key::Char('9')));
    assert_eq!(outcome, RouteOutcome::Ignored);
    assert_eq!(h.session.calculator().expression(), "9");
}

// ── Beyond the basic scenarios ───────────────────────────────────────────

#[tokio::test]
async fn failed_submission_keeps_buffer_and_reports() {
    let submitter = ScriptedSubmitter::new(vec![Err(SubmissionError::Rejected {
        status_code: 500,
        message: "abort".into(),
    })]);
    let mut h = harness(submitter, Some("0xabc"));
    h.session.toggle();

    press(&mut h.session, "8 / 0 =");
    h.session.finish().await;

    let calc = h.session.calculator();
    assert_eq!(calc.expression(), "8 / 0");
    assert_eq!(calc.result(), None);
    let status = calc.status().unwrap();
    assert!(status.contains("::/"), "{status}");
    assert!(status.contains("abort"), "{status}");
    assert!(calc.is_active());
}

#[tokio::test]
async fn named_functions_for_power() {
    let submitter = ScriptedSubmitter::returning("1024");
    let mut h = harness_with(submitter.clone(), Some("0xabc"), FunctionNaming::Named);
    h.session.toggle();

    press(&mut h.session, "2 ** 10 =");
    h.session.finish().await;

    assert_eq!(submitter.requests()[0].0.function_name, format!("{MODULE}::power"));
    assert_eq!(h.session.calculator().result(), Some("1024"));
}

#[tokio::test]
async fn delete_and_clear_edit_the_expression() {
    let submitter = ScriptedSubmitter::returning("6");
    let mut h = harness(submitter.clone(), Some("0xabc"));
    h.session.toggle();

    press(&mut h.session, "9 C 4 + 22 ← =");
    h.session.finish().await;

    assert_eq!(submitter.requests()[0].0.arguments, ["4".to_string(), "2".to_string()]);
    assert_eq!(h.session.calculator().result(), Some("6"));
}

#[tokio::test]
async fn run_loop_publishes_events_in_order() {
    let submitter = ScriptedSubmitter::returning("12");
    let h = harness(submitter, Some("0xabc"));
    let mut session = h.session;
    let mut events = h.bus.subscribe();

    let (tx, rx) = mpsc::channel(32);
    tx.send(SessionEvent::ToggleActivation).await.unwrap();
    for button in parse_script("7 + 5 =").unwrap() {
        tx.send(SessionEvent::Input(InputEvent::Button(button)))
            .await
            .unwrap();
    }
    drop(tx);
    session.run(rx, &mut NullView).await;

    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        kinds.push(match event.as_ref() {
            DomainEvent::GateToggled { .. } => "toggled",
            DomainEvent::InputAccepted { .. } => "input",
            DomainEvent::ParseRejected { .. } => "rejected",
            DomainEvent::DispatchStarted { .. } => "started",
            DomainEvent::DispatchCompleted { .. } => "completed",
            DomainEvent::DispatchFailed { .. } => "failed",
        });
    }
    assert_eq!(
        kinds,
        ["toggled", "input", "input", "input", "started", "completed"]
    );
    assert_eq!(session.calculator().result(), Some("12"));
}

#[tokio::test]
async fn default_config_dispatches_as_dry_run() {
    let mut config = AppConfig::default();
    config.apply_env(|key| (key == "LEDGERCALC_ACCOUNT").then(|| "0xabc".to_string()));
    config.validate().unwrap();

    let bus = Arc::new(EventBus::default());
    let dispatcher = Arc::new(ledgercalc_dispatch::build_from_config(&config, bus.clone()));
    assert_eq!(dispatcher.submitter_name(), "dry_run");

    let mut calculator = Calculator::new(bus).with_parse_options(config.parser);
    calculator.toggle();
    let mut session = Session::new(calculator, dispatcher);

    press(&mut session, "6 - 1 =");
    session.finish().await;

    let result = session.calculator().result().unwrap();
    assert!(result.starts_with("dryrun:"), "{result}");
}
