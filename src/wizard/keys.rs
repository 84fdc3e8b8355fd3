use super::engine::WizardAction;
use super::view::FieldInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "VIRUMAP_WIZARD_SCRIPT_KEYS";

const SCROLL_STEP: i16 = 5;

/// Maps a key press to a wizard action. While a text control has focus,
/// printable characters are typed instead of being treated as commands.
pub fn wizard_action_from_key(text_focused: bool, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(WizardAction::Quit),
            KeyCode::Char('s') => Some(WizardAction::Secondary),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(WizardAction::Primary),
        KeyCode::Esc => Some(WizardAction::Back),
        KeyCode::Tab | KeyCode::Down => Some(WizardAction::Input(FieldInput::FocusNext)),
        KeyCode::BackTab | KeyCode::Up => Some(WizardAction::Input(FieldInput::FocusPrev)),
        KeyCode::Right => Some(WizardAction::Input(FieldInput::OptionNext)),
        KeyCode::Left => Some(WizardAction::Input(FieldInput::OptionPrev)),
        KeyCode::Backspace => Some(WizardAction::Input(FieldInput::Backspace)),
        KeyCode::PageDown => Some(WizardAction::Scroll(SCROLL_STEP)),
        KeyCode::PageUp => Some(WizardAction::Scroll(-SCROLL_STEP)),
        KeyCode::Char(' ') if !text_focused => Some(WizardAction::Input(FieldInput::Toggle)),
        KeyCode::Char(ch) if text_focused => Some(WizardAction::Input(FieldInput::Char(ch))),
        _ => None,
    }
}

/// Parses a comma-separated key script, e.g. `right,tab,text:1407,enter`.
/// `text:<chars>` expands to one key press per character.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(text) = trimmed.strip_prefix("text:") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let key = match trimmed.to_ascii_lowercase().as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "backtab" => KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "space" => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "pageup" => KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            "pagedown" => KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "ctrl-s" => KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,left,right,tab,backtab,enter,esc,space,backspace,pageup,pagedown,ctrl-c,ctrl-s,text:<chars>"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}
