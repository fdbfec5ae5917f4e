//! `ledgercalc run` — Interactive raw-mode calculator.

use std::sync::Arc;

use ledgercalc_config::AppConfig;
use ledgercalc_core::event::EventBus;
use ledgercalc_input::{RawModeGuard, TerminalView, spawn_key_reader};
use tokio::sync::mpsc;
use tracing::info;

use super::build_session;

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.account.address.is_none() {
        eprintln!("  ⚠️  No account configured — operations will not be sent.");
        eprintln!("     Set LEDGERCALC_ACCOUNT or account.address in config.toml.");
    }

    let event_bus = Arc::new(EventBus::default());
    let mut session = build_session(&config, event_bus);
    let mut view = TerminalView::new(config.module_id());

    info!(
        module = %config.module_id(),
        network = %config.network.name,
        submitter = %config.dispatch.submitter,
        "Starting interactive session"
    );

    let (tx, rx) = mpsc::channel(64);
    let guard = RawModeGuard::enter()?;
    let reader = spawn_key_reader(tx);

    session.run(rx, &mut view).await;

    // Receiver is gone; the reader notices within one poll interval
    let _ = reader.await;
    drop(guard);

    let calculator = session.calculator();
    if let Some(result) = calculator.result() {
        println!("Last result: {result}");
    }
    info!("Session ended");
    Ok(())
}
