use super::action_bar::MountedBar;
use super::context::AppContext;
use super::header::HeaderState;
use super::navigation::{Location, NavError, NavigationState};
use super::step::{Step, StepEvent, StepOutcome};
use super::view::{FieldInput, StepView, ViewBlock};
use crate::shared::StepPath;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Primary,
    Secondary,
    Back,
    Input(FieldInput),
    Scroll(i16),
    Quit,
}

impl WizardAction {
    fn as_str(self) -> &'static str {
        match self {
            WizardAction::Primary => "primary",
            WizardAction::Secondary => "secondary",
            WizardAction::Back => "back",
            WizardAction::Input(_) => "input",
            WizardAction::Scroll(_) => "scroll",
            WizardAction::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardSignal {
    Continue,
    Quit,
}

/// Snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub location: Option<Location>,
    pub header: HeaderState,
    pub body: StepView,
    pub action_bar: Option<MountedBar>,
    pub scroll: u16,
    pub status: Option<String>,
    pub language: String,
}

/// Navigation controller plus step table. Owns the [`AppContext`] and is the
/// only place that changes location, so lifecycle ordering lives here.
pub struct Wizard {
    steps: BTreeMap<StepPath, Box<dyn Step>>,
    cx: AppContext,
    active: Option<StepPath>,
    status: Option<String>,
}

impl Wizard {
    pub fn new(steps: Vec<Box<dyn Step>>, cx: AppContext) -> Self {
        let steps = steps
            .into_iter()
            .map(|step| (step.descriptor().path.clone(), step))
            .collect();
        Self {
            steps,
            cx,
            active: None,
            status: None,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.cx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.cx
    }

    pub fn into_context(self) -> AppContext {
        self.cx
    }

    pub fn active_path(&self) -> Option<&StepPath> {
        self.active.as_ref()
    }

    pub fn has_step(&self, path: &StepPath) -> bool {
        self.steps.contains_key(path)
    }

    pub fn step_paths(&self) -> impl Iterator<Item = &StepPath> {
        self.steps.keys()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn start(&mut self, path: &StepPath, state: NavigationState) -> Result<(), NavError> {
        self.go_to(path.clone(), state)
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<WizardSignal, NavError> {
        let active = self.active.clone().ok_or(NavError::NotStarted)?;
        self.status = None;
        let outcome = match action {
            WizardAction::Quit => return Ok(WizardSignal::Quit),
            WizardAction::Scroll(delta) => {
                self.cx.viewport.scroll_by(delta);
                return Ok(WizardSignal::Continue);
            }
            WizardAction::Input(input) => {
                step_of(&mut self.steps, &active)?.on_input(input, &mut self.cx);
                StepOutcome::Stay
            }
            WizardAction::Primary => {
                if !self.cx.action_bar.primary_enabled() {
                    self.status = Some("Complete the form to continue.".to_string());
                    return Ok(WizardSignal::Continue);
                }
                step_of(&mut self.steps, &active)?.on_primary(&mut self.cx)
            }
            WizardAction::Secondary => {
                let has_secondary = self
                    .cx
                    .action_bar
                    .mounted()
                    .is_some_and(|bar| bar.buttons.secondary.is_some());
                if !has_secondary {
                    return Ok(WizardSignal::Continue);
                }
                step_of(&mut self.steps, &active)?.on_secondary(&mut self.cx)
            }
            WizardAction::Back => {
                if !self.cx.header.back_visible() {
                    self.status = Some("Back is not available here.".to_string());
                    return Ok(WizardSignal::Continue);
                }
                step_of(&mut self.steps, &active)?.on_back(&mut self.cx)
            }
        };
        if outcome != StepOutcome::Stay {
            self.cx.log.info(
                "wizard.action",
                &format!("step={active} action={}", action.as_str()),
            );
        }
        self.perform(outcome)?;
        Ok(WizardSignal::Continue)
    }

    /// Delivers finished background work to the active step.
    pub fn tick(&mut self) {
        let Some(resolution) = self.cx.services.country.poll(&self.cx.log) else {
            return;
        };
        self.notify(StepEvent::CountryResolved(resolution));
    }

    /// Blocks for pending background work; used by headless runs and tests.
    pub fn settle(&mut self, timeout: std::time::Duration) {
        if !self.cx.services.country.is_pending() {
            return;
        }
        if let Some(resolution) = self.cx.services.country.wait(timeout, &self.cx.log) {
            self.notify(StepEvent::CountryResolved(resolution));
        }
    }

    /// True while the focused control takes typed characters.
    pub fn text_focused(&self) -> bool {
        self.active
            .as_ref()
            .and_then(|path| self.steps.get(path))
            .is_some_and(|step| {
                step.view(&self.cx).blocks.iter().any(|block| {
                    matches!(
                        block,
                        ViewBlock::Control(control) if control.focused && control.text_input
                    )
                })
            })
    }

    pub fn view(&self) -> WizardView {
        let body = self
            .active
            .as_ref()
            .and_then(|path| self.steps.get(path))
            .map(|step| step.view(&self.cx))
            .unwrap_or_default();
        WizardView {
            location: self.cx.location().cloned(),
            header: self.cx.header.clone(),
            body,
            action_bar: self.cx.action_bar.mounted().cloned(),
            scroll: self.cx.viewport.offset,
            status: self.status.clone(),
            language: self.cx.language.clone(),
        }
    }

    /// Hands an event to the active step and refreshes its buttons.
    pub fn notify(&mut self, event: StepEvent) {
        let Some(active) = self.active.clone() else {
            return;
        };
        if let Some(step) = self.steps.get_mut(&active) {
            step.on_event(event, &mut self.cx);
        }
        self.refresh_action_bar();
    }

    fn perform(&mut self, outcome: StepOutcome) -> Result<(), NavError> {
        match outcome {
            StepOutcome::Stay => {
                self.refresh_action_bar();
                Ok(())
            }
            StepOutcome::GoTo { path, state } => self.go_to(path, state),
            StepOutcome::HistoryBack => {
                if !self.cx.history.can_go_back() {
                    self.status = Some("Nothing to go back to.".to_string());
                    self.refresh_action_bar();
                    return Ok(());
                }
                self.leave_active();
                let Some(target) = self.cx.history.go_back().map(|loc| loc.path.clone()) else {
                    return Ok(());
                };
                self.cx.log.info("nav.back", target.as_str());
                self.enter(target)
            }
        }
    }

    fn go_to(&mut self, path: StepPath, state: NavigationState) -> Result<(), NavError> {
        if !self.steps.contains_key(&path) {
            return Err(NavError::UnknownStep {
                path: path.to_string(),
            });
        }
        self.leave_active();
        self.cx.log.info("nav.go_to", path.as_str());
        self.cx.history.go_to(path.clone(), state);
        self.enter(path)
    }

    /// Takes the action bar down before anything else happens so a stale,
    /// still-enabled bar is never shown during the transition.
    fn leave_active(&mut self) {
        let Some(previous) = self.active.take() else {
            return;
        };
        self.cx.action_bar.unmount(&previous);
        if let Some(step) = self.steps.get_mut(&previous) {
            step.on_exit(&mut self.cx);
        }
        self.cx.log.info("step.exit", previous.as_str());
    }

    fn enter(&mut self, path: StepPath) -> Result<(), NavError> {
        self.cx.viewport.scroll_to_top();
        step_of(&mut self.steps, &path)?.on_enter(&mut self.cx);
        self.cx.log.info("step.enter", path.as_str());
        self.active = Some(path);
        self.refresh_action_bar();
        Ok(())
    }

    fn refresh_action_bar(&mut self) {
        let Some(active) = self.active.clone() else {
            return;
        };
        let Some(step) = self.steps.get(&active) else {
            return;
        };
        match step.action_buttons(&self.cx) {
            Some(buttons) => {
                if let Some(displaced) = self.cx.action_bar.mount(active.clone(), buttons) {
                    self.cx.log.warn(
                        "action_bar.displaced",
                        &format!("owner={displaced} replaced_by={active}"),
                    );
                }
            }
            None => {
                self.cx.action_bar.unmount(&active);
            }
        }
    }
}

fn step_of<'a>(
    steps: &'a mut BTreeMap<StepPath, Box<dyn Step>>,
    path: &StepPath,
) -> Result<&'a mut Box<dyn Step>, NavError> {
    steps.get_mut(path).ok_or_else(|| NavError::UnknownStep {
        path: path.to_string(),
    })
}
