//! Raw-mode terminal front end.
//!
//! A blocking thread reads crossterm events and forwards them as
//! `SessionEvent`s. `TerminalView` redraws the whole screen on each
//! render; the calculator is only a few lines tall.
//!
//! Presentation keys never reach the router:
//! - `F2` / `Tab` toggle the activation gate
//! - `Esc` / `Ctrl+C` quit

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::calculator::{CalcState, Calculator};
use crate::event::{InputEvent, Key, SessionEvent};
use crate::session::View;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Convert a crossterm key event. Releases and repeats are dropped.
pub fn convert_key_event(event: KeyEvent) -> Option<SessionEvent> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let session_event = match event.code {
        KeyCode::Char('c') if ctrl => SessionEvent::Quit,
        KeyCode::Esc => SessionEvent::Quit,
        KeyCode::F(2) | KeyCode::Tab => SessionEvent::ToggleActivation,
        KeyCode::Char(c) => SessionEvent::Input(InputEvent::Key(Key::Char(c))),
        KeyCode::Enter => SessionEvent::Input(InputEvent::Key(Key::Enter)),
        KeyCode::Backspace => SessionEvent::Input(InputEvent::Key(Key::Backspace)),
        KeyCode::Delete => key_other("Delete"),
        KeyCode::Up => key_other("ArrowUp"),
        KeyCode::Down => key_other("ArrowDown"),
        KeyCode::Left => key_other("ArrowLeft"),
        KeyCode::Right => key_other("ArrowRight"),
        KeyCode::F(n) => key_other(&format!("F{n}")),
        other => key_other(&format!("{other:?}")),
    };
    Some(session_event)
}

fn key_other(name: &str) -> SessionEvent {
    SessionEvent::Input(InputEvent::Key(Key::Other(name.to_string())))
}

/// Spawn the blocking key reader.
///
/// The thread exits after forwarding `Quit`, when the receiver is dropped,
/// or on a terminal read error.
pub fn spawn_key_reader(tx: mpsc::Sender<SessionEvent>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "Terminal poll failed");
                    break;
                }
            }
            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "Terminal read failed");
                    break;
                }
            };
            let Some(session_event) = convert_key_event(key) else {
                continue;
            };
            let quit = session_event == SessionEvent::Quit;
            if tx.blocking_send(session_event).is_err() || quit {
                break;
            }
        }
        debug!("Key reader stopped");
    })
}

/// Raw mode plus the alternate screen, restored on drop.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best effort
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draws the calculator to stdout.
pub struct TerminalView {
    out: Stdout,
    module_id: String,
}

impl TerminalView {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            out: io::stdout(),
            module_id: module_id.into(),
        }
    }

    fn draw(&mut self, calculator: &Calculator) -> io::Result<()> {
        let lines = screen_lines(&self.module_id, calculator);
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in (0u16..).zip(lines.iter()) {
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()
    }
}

impl View for TerminalView {
    fn render(&mut self, calculator: &Calculator) {
        if let Err(e) = self.draw(calculator) {
            warn!(error = %e, "Render failed");
        }
    }
}

/// Text content of the screen, top to bottom.
pub fn screen_lines(module_id: &str, calculator: &Calculator) -> Vec<String> {
    let gate = if calculator.is_active() { "ON" } else { "OFF" };
    let state = match calculator.state() {
        CalcState::Idle => "idle",
        CalcState::Accumulating => "typing",
        CalcState::Dispatching => "dispatching",
    };

    let mut lines = vec![
        format!("ledgercalc  [{gate}]  {state}  {module_id}"),
        String::new(),
        format!("  {}", calculator.display()),
        String::new(),
    ];
    if let Some(result) = calculator.result() {
        lines.push(format!("  = {result}"));
    }
    if let Some(status) = calculator.status() {
        lines.push(format!("  {status}"));
    }
    lines.push(String::new());
    lines.push("F2/Tab on/off · Enter = · Backspace del · c clear · Esc quit".to_string());
    lines
}
