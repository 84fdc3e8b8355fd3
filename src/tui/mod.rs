//! Terminal front end for the wizard.

pub mod render;

use crate::wizard::keys::{parse_scripted_keys, wizard_action_from_key, SCRIPT_KEYS_ENV};
use crate::wizard::{Wizard, WizardSignal};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

pub use render::draw_wizard;

const INPUT_POLL: Duration = Duration::from_millis(250);

pub fn load_scripted_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

pub fn run_wizard_tui(wizard: &mut Wizard) -> Result<(), String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let result = run_wizard_tui_loop(wizard, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    result
}

fn run_wizard_tui_loop(
    wizard: &mut Wizard,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    loop {
        wizard.tick();
        let view = wizard.view();
        terminal
            .draw(|frame| draw_wizard(frame, &view))
            .map_err(|e| format!("failed to render wizard ui: {e}"))?;
        if !event::poll(INPUT_POLL).map_err(|e| format!("failed to poll wizard input: {e}"))? {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = wizard_action_from_key(wizard.text_focused(), key) else {
            continue;
        };
        match wizard.dispatch(action).map_err(|err| err.to_string())? {
            WizardSignal::Quit => return Ok(()),
            WizardSignal::Continue => {}
        }
    }
}

/// Drives the wizard from a key script without a terminal. Background
/// lookups are awaited before each key so runs are deterministic.
pub fn run_wizard_scripted(
    wizard: &mut Wizard,
    keys: Vec<KeyEvent>,
    settle_timeout: Duration,
) -> Result<WizardSignal, String> {
    for key in keys {
        wizard.settle(settle_timeout);
        let Some(action) = wizard_action_from_key(wizard.text_focused(), key) else {
            continue;
        };
        if wizard.dispatch(action).map_err(|err| err.to_string())? == WizardSignal::Quit {
            return Ok(WizardSignal::Quit);
        }
    }
    wizard.settle(settle_timeout);
    Ok(WizardSignal::Continue)
}
