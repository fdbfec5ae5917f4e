//! Build a dispatcher from configuration.

use std::sync::Arc;
use std::time::Duration;

use ledgercalc_config::AppConfig;
use ledgercalc_core::event::EventBus;
use ledgercalc_core::{StaticAccount, Submitter};

use crate::dispatcher::OperationDispatcher;
use crate::dry_run::DryRunSubmitter;
use crate::relay::RelaySubmitter;

/// Select the submitter named by `dispatch.submitter`.
///
/// Assumes a validated config; a relay without URL falls back to dry run.
pub fn build_submitter(config: &AppConfig) -> Arc<dyn Submitter> {
    match (config.dispatch.submitter.as_str(), &config.dispatch.relay_url) {
        ("relay", Some(url)) => {
            let timeout = match config.dispatch.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            let mut relay = RelaySubmitter::new(url, &config.network.name).with_timeout(timeout);
            if let Some(token) = &config.dispatch.relay_token {
                relay = relay.with_token(token);
            }
            Arc::new(relay)
        }
        (name, _) => {
            if name != "dry_run" {
                tracing::warn!(submitter = name, "Unusable submitter config, using dry run");
            }
            Arc::new(DryRunSubmitter)
        }
    }
}

pub fn build_from_config(config: &AppConfig, event_bus: Arc<EventBus>) -> OperationDispatcher {
    let accounts = Arc::new(StaticAccount::new(config.account.account_ref()));
    OperationDispatcher::new(build_submitter(config), accounts, config.module_id(), event_bus)
        .with_naming(config.dispatch.function_naming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgercalc_core::{FunctionNaming, OperatorToken};

    #[test]
    fn default_config_uses_dry_run() {
        let dispatcher = build_from_config(&AppConfig::default(), Arc::new(EventBus::default()));
        assert_eq!(dispatcher.submitter_name(), "dry_run");
        assert!(
            dispatcher
                .function_name(OperatorToken::Add)
                .ends_with("::calculator::+")
        );
    }

    #[test]
    fn relay_config_builds_relay() {
        let mut config = AppConfig::default();
        config.dispatch.submitter = "relay".into();
        config.dispatch.relay_url = Some("http://127.0.0.1:9/submit".into());
        config.dispatch.function_naming = FunctionNaming::Named;
        config.module.address = "0x7".into();

        let dispatcher = build_from_config(&config, Arc::new(EventBus::default()));
        assert_eq!(dispatcher.submitter_name(), "relay");
        assert_eq!(
            dispatcher.function_name(OperatorToken::Divide),
            "0x7::calculator::divide"
        );
    }
}
