//! Input handling for ledgercalc.
//!
//! Raw events (on-screen buttons, keyboard) become `Command`s, which the
//! `Calculator` routes into buffer mutations or a dispatch. A `Session`
//! owns the calculator, runs dispatches concurrently with input and feeds
//! their outcomes back.
//!
//! Front ends:
//! - **terminal** — raw-mode crossterm key reader and screen renderer
//! - **script** — space-separated button scripts (`7 + 5 =`)

pub mod calculator;
pub mod event;
pub mod keymap;
pub mod script;
pub mod session;
pub mod terminal;

pub use calculator::{CalcState, Calculator, PendingDispatch, RouteOutcome};
pub use event::{Button, Command, InputEvent, Key, SessionEvent};
pub use script::{ScriptError, parse_script};
pub use session::{NullView, Session, View};
pub use terminal::{RawModeGuard, TerminalView, spawn_key_reader};
