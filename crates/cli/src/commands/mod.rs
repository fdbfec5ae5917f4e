pub mod doctor;
pub mod eval;
pub mod onboard;
pub mod run;
pub mod status;

use std::sync::Arc;

use ledgercalc_config::AppConfig;
use ledgercalc_core::event::EventBus;
use ledgercalc_dispatch::build_from_config;
use ledgercalc_input::{Calculator, Session};

/// Wire a session from configuration. The gate starts closed; only a
/// user toggle opens it.
pub fn build_session(config: &AppConfig, event_bus: Arc<EventBus>) -> Session {
    let dispatcher = Arc::new(build_from_config(config, event_bus.clone()));
    let calculator = Calculator::new(event_bus)
        .with_parse_options(config.parser)
        .with_clear_on_success(config.input.clear_on_success);
    Session::new(calculator, dispatcher)
}
