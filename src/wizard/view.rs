//! Renderer-neutral description of a step's body and the shared control
//! handling used by form steps.

use crate::form::FormState;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Select {
        options: Vec<SelectOption>,
        disabled: bool,
    },
    Text {
        placeholder: String,
    },
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub field: &'static str,
    pub label: String,
    pub kind: ControlKind,
}

impl Control {
    pub fn select(field: &'static str, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            field,
            label: label.to_string(),
            kind: ControlKind::Select {
                options,
                disabled: false,
            },
        }
    }

    pub fn text(field: &'static str, label: &str, placeholder: &str) -> Self {
        Self {
            field,
            label: label.to_string(),
            kind: ControlKind::Text {
                placeholder: placeholder.to_string(),
            },
        }
    }

    pub fn checkbox(field: &'static str, label: &str) -> Self {
        Self {
            field,
            label: label.to_string(),
            kind: ControlKind::Checkbox,
        }
    }

    pub fn disabled_when(mut self, disabled: bool) -> Self {
        if let ControlKind::Select { disabled: slot, .. } = &mut self.kind {
            *slot = disabled;
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ControlKind::Text { .. })
    }
}

/// Input aimed at the step body rather than the action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    FocusNext,
    FocusPrev,
    OptionNext,
    OptionPrev,
    Toggle,
    Char(char),
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub label: String,
    pub value: String,
    pub placeholder: bool,
    pub focused: bool,
    pub disabled: bool,
    pub text_input: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBlock {
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Link { label: String, url: String },
    Control(ControlView),
    Notice(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepView {
    pub blocks: Vec<ViewBlock>,
}

impl StepView {
    pub fn push(&mut self, block: ViewBlock) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(ViewBlock::Paragraph(text.into()))
    }

    pub fn controls(&mut self, form: &FormState, controls: &[Control], focus: usize) -> &mut Self {
        for (idx, control) in controls.iter().enumerate() {
            self.blocks
                .push(ViewBlock::Control(control_view(form, control, idx == focus)));
        }
        self
    }
}

fn control_view(form: &FormState, control: &Control, focused: bool) -> ControlView {
    let (value, placeholder, disabled) = match &control.kind {
        ControlKind::Select { options, disabled } => {
            let current = form.get_str(control.field).unwrap_or_default();
            match options.iter().find(|option| option.value == current) {
                Some(option) => (option.label.clone(), false, *disabled),
                None if current.is_empty() => ("Select...".to_string(), true, *disabled),
                None => (current.to_string(), false, *disabled),
            }
        }
        ControlKind::Text { placeholder } => match form.get_str(control.field) {
            Some(value) if !value.is_empty() => (value.to_string(), false, false),
            _ => (placeholder.clone(), true, false),
        },
        ControlKind::Checkbox => {
            let mark = if form.get_bool(control.field) { "[x]" } else { "[ ]" };
            (mark.to_string(), false, false)
        }
    };
    ControlView {
        label: control.label.clone(),
        value,
        placeholder,
        focused,
        disabled,
        text_input: control.is_text(),
        error: form.visible_error(control.field).map(str::to_string),
    }
}

/// Applies `input` to the focused control. Returns the field whose value
/// changed, if any.
pub fn apply_control_input(
    form: &mut FormState,
    controls: &[Control],
    focus: &mut usize,
    input: FieldInput,
) -> Option<&'static str> {
    if controls.is_empty() {
        return None;
    }
    *focus = (*focus).min(controls.len() - 1);
    match input {
        FieldInput::FocusNext => {
            *focus = (*focus + 1) % controls.len();
            return None;
        }
        FieldInput::FocusPrev => {
            *focus = (*focus + controls.len() - 1) % controls.len();
            return None;
        }
        _ => {}
    }

    let control = &controls[*focus];
    match (&control.kind, input) {
        (ControlKind::Select { disabled: true, .. }, _) => None,
        (ControlKind::Select { options, .. }, FieldInput::OptionNext | FieldInput::OptionPrev) => {
            if options.is_empty() {
                return None;
            }
            let current = form.get_str(control.field).unwrap_or_default();
            let position = options.iter().position(|option| option.value == current);
            let next = match (position, input) {
                (None, _) => 0,
                (Some(idx), FieldInput::OptionNext) => (idx + 1) % options.len(),
                (Some(idx), _) => (idx + options.len() - 1) % options.len(),
            };
            form.set(control.field, Value::String(options[next].value.clone()));
            Some(control.field)
        }
        (ControlKind::Text { .. }, FieldInput::Char(ch)) => {
            let mut value = form.get_str(control.field).unwrap_or_default().to_string();
            value.push(ch);
            form.set(control.field, Value::String(value));
            Some(control.field)
        }
        (ControlKind::Text { .. }, FieldInput::Backspace) => {
            let mut value = form.get_str(control.field).unwrap_or_default().to_string();
            value.pop();
            form.set(control.field, Value::String(value));
            Some(control.field)
        }
        (ControlKind::Checkbox, FieldInput::Toggle | FieldInput::Char(' ')) => {
            let flipped = !form.get_bool(control.field);
            form.set(control.field, Value::Bool(flipped));
            Some(control.field)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Rule, Schema};

    fn controls() -> Vec<Control> {
        vec![
            Control::select(
                "illStatus",
                "Are you ill?",
                vec![SelectOption::new("yes", "Yes"), SelectOption::new("no", "No")],
            ),
            Control::text("zipCode", "Zip code", "Enter zip code"),
            Control::checkbox("agreed", "I agree"),
        ]
    }

    #[test]
    fn select_cycles_through_options_and_wraps() {
        let mut form = FormState::new(Schema::new().field("illStatus", [Rule::Required]));
        let controls = controls();
        let mut focus = 0;
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::OptionNext);
        assert_eq!(form.get_str("illStatus"), Some("yes"));
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::OptionNext);
        assert_eq!(form.get_str("illStatus"), Some("no"));
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::OptionNext);
        assert_eq!(form.get_str("illStatus"), Some("yes"));
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::OptionPrev);
        assert_eq!(form.get_str("illStatus"), Some("no"));
    }

    #[test]
    fn text_and_checkbox_edit_the_focused_field() {
        let mut form = FormState::new(Schema::new());
        let controls = controls();
        let mut focus = 0;
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::FocusNext);
        for ch in "14a".chars() {
            apply_control_input(&mut form, &controls, &mut focus, FieldInput::Char(ch));
        }
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::Backspace);
        assert_eq!(form.get_str("zipCode"), Some("14"));

        apply_control_input(&mut form, &controls, &mut focus, FieldInput::FocusNext);
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::Toggle);
        assert!(form.get_bool("agreed"));
        apply_control_input(&mut form, &controls, &mut focus, FieldInput::FocusNext);
        assert_eq!(focus, 0);
    }

    #[test]
    fn disabled_select_ignores_input() {
        let mut form = FormState::new(Schema::new());
        let controls = vec![Control::select(
            "language",
            "Language",
            vec![SelectOption::new("es", "Español")],
        )
        .disabled_when(true)];
        let mut focus = 0;
        assert!(
            apply_control_input(&mut form, &controls, &mut focus, FieldInput::OptionNext)
                .is_none()
        );
        assert!(form.get_str("language").is_none());
    }
}
