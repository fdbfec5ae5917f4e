//! Operation dispatch for ledgercalc.
//!
//! The dispatcher turns a `ParsedOperation` into a `DispatchRequest` and
//! hands it to a `Submitter`. Submitters:
//! - **relay** — POSTs the entry-function payload to a signing relay
//! - **dry_run** — builds the payload only, no network I/O
//!
//! `factory::build_from_config` wires the right pieces from `AppConfig`.

pub mod dispatcher;
pub mod dry_run;
pub mod factory;
pub mod handle;
pub mod relay;

pub use dispatcher::OperationDispatcher;
pub use dry_run::DryRunSubmitter;
pub use factory::{build_from_config, build_submitter};
pub use handle::DispatchHandle;
pub use relay::RelaySubmitter;
