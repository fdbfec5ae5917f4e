//! `ledgercalc eval` — Press a button script and print the outcome.

use std::sync::Arc;

use ledgercalc_config::AppConfig;
use ledgercalc_core::event::{DomainEvent, EventBus};
use ledgercalc_input::{InputEvent, parse_script};
use tracing::debug;

use super::build_session;

pub async fn run(script: &str, json: bool, events: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let buttons = parse_script(script)?;

    let event_bus = Arc::new(EventBus::default());
    let mut event_rx = event_bus.subscribe();
    let mut session = build_session(&config, event_bus);

    // Running a script is the user's explicit toggle
    session.toggle();

    for button in buttons {
        let outcome = session.handle_input(InputEvent::Button(button));
        debug!(?button, ?outcome, "Button pressed");
    }
    session.finish().await;

    if events {
        while let Ok(event) = event_rx.try_recv() {
            println!("{}", event_line(&event)?);
        }
    }

    let calculator = session.calculator();
    if json {
        let report = serde_json::json!({
            "expression": calculator.expression(),
            "display": calculator.display(),
            "result": calculator.result(),
            "status": calculator.status(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("  Display: {}", calculator.display());
    if let Some(result) = calculator.result() {
        println!("  Result:  {result}");
    }
    if let Some(status) = calculator.status() {
        println!("  Status:  {status}");
    }
    Ok(())
}

/// One JSON line per event, as printed by `--events`.
fn event_line(event: &DomainEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}
