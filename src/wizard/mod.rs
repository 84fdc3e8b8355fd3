//! Step sequencing: descriptors, the shared application context, header and
//! action-bar chrome, location history and the engine that ties them
//! together.

pub mod action_bar;
pub mod context;
pub mod descriptor;
pub mod engine;
pub mod header;
pub mod keys;
pub mod navigation;
pub mod step;
pub mod view;

pub use action_bar::{ActionBar, ActionButtons, Button, MountedBar, SecondaryRole};
pub use context::{AppContext, Services, Viewport};
pub use descriptor::{RecordingLogic, StepDescriptor, StepMetadata};
pub use engine::{Wizard, WizardAction, WizardSignal, WizardView};
pub use header::{BackHandler, HeaderState, HeaderType, LogoSize};
pub use navigation::{History, Location, NavError, NavigationState};
pub use step::{back_outcome, next_outcome, Step, StepEvent, StepOutcome};
pub use view::{
    apply_control_input, Control, ControlKind, ControlView, FieldInput, SelectOption, StepView,
    ViewBlock,
};
