use super::action_bar::ActionButtons;
use super::context::AppContext;
use super::descriptor::StepDescriptor;
use super::navigation::{Location, NavigationState};
use super::view::{FieldInput, StepView};
use crate::country::CountryResolution;
use crate::shared::StepPath;

/// What a step asks the navigation controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Stay,
    GoTo {
        path: StepPath,
        state: NavigationState,
    },
    HistoryBack,
}

/// Asynchronous results delivered to the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    CountryResolved(CountryResolution),
    /// Token reported by the CAPTCHA widget; `None` once it expires.
    CaptchaToken(Option<String>),
    CaptchaErrored,
}

/// Forward navigation after a valid submit: the configured next step, or
/// nothing for dead-end steps.
pub fn next_outcome(descriptor: &StepDescriptor, state: NavigationState) -> StepOutcome {
    match &descriptor.next_step {
        Some(path) => StepOutcome::GoTo {
            path: path.clone(),
            state,
        },
        None => StepOutcome::Stay,
    }
}

/// Back navigation: the configured previous step, or history-back.
pub fn back_outcome(descriptor: &StepDescriptor, current: Option<&Location>) -> StepOutcome {
    match &descriptor.previous_step {
        Some(path) => StepOutcome::GoTo {
            path: path.clone(),
            state: NavigationState::carried(current),
        },
        None => StepOutcome::HistoryBack,
    }
}

/// One wizard screen. The engine calls `on_enter` after scrolling the
/// viewport to the top and `on_exit` before the location changes.
pub trait Step {
    fn descriptor(&self) -> &StepDescriptor;

    /// Configure the header and hydrate local state from the store.
    fn on_enter(&mut self, cx: &mut AppContext);

    fn on_exit(&mut self, _cx: &mut AppContext) {}

    fn on_input(&mut self, _input: FieldInput, _cx: &mut AppContext) {}

    fn on_event(&mut self, _event: StepEvent, _cx: &mut AppContext) {}

    /// Primary action-bar button. Only invoked while it is enabled.
    fn on_primary(&mut self, cx: &mut AppContext) -> StepOutcome;

    fn on_secondary(&mut self, _cx: &mut AppContext) -> StepOutcome {
        StepOutcome::Stay
    }

    /// Header back arrow.
    fn on_back(&mut self, cx: &mut AppContext) -> StepOutcome {
        back_outcome(self.descriptor(), cx.location())
    }

    /// Buttons to mount while active; `None` leaves the action bar empty.
    fn action_buttons(&self, cx: &AppContext) -> Option<ActionButtons>;

    fn view(&self, cx: &AppContext) -> StepView;
}
