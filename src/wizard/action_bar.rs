use crate::shared::StepPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled_when(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryRole {
    Back,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButtons {
    pub primary: Button,
    pub secondary: Option<(Button, SecondaryRole)>,
    pub invert: bool,
}

impl ActionButtons {
    pub fn primary(button: Button) -> Self {
        Self {
            primary: button,
            secondary: None,
            invert: true,
        }
    }

    pub fn with_secondary(mut self, button: Button, role: SecondaryRole) -> Self {
        self.secondary = Some((button, role));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBar {
    pub owner: StepPath,
    pub buttons: ActionButtons,
}

/// The fixed button region rendered outside the step body. Holds at most one
/// step's buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBar {
    mounted: Option<MountedBar>,
}

impl ActionBar {
    /// Mounts `buttons` for `owner`, displacing whatever was there. Returns
    /// the displaced owner when it was a different step.
    pub fn mount(&mut self, owner: StepPath, buttons: ActionButtons) -> Option<StepPath> {
        let displaced = self
            .mounted
            .take()
            .map(|bar| bar.owner)
            .filter(|previous| *previous != owner);
        self.mounted = Some(MountedBar { owner, buttons });
        displaced
    }

    /// Removes the bar only when `owner` is the one mounted.
    pub fn unmount(&mut self, owner: &StepPath) -> bool {
        if self.owner() == Some(owner) {
            self.mounted = None;
            return true;
        }
        false
    }

    pub fn mounted(&self) -> Option<&MountedBar> {
        self.mounted.as_ref()
    }

    pub fn owner(&self) -> Option<&StepPath> {
        self.mounted.as_ref().map(|bar| &bar.owner)
    }

    pub fn primary_enabled(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|bar| !bar.buttons.primary.disabled)
    }
}
