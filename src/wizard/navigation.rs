use crate::shared::StepPath;

/// Transient state carried with a location, not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub is_short_audio_collection: bool,
    pub from: Option<String>,
}

impl NavigationState {
    pub fn from_step(from: &str, is_short_audio_collection: bool) -> Self {
        Self {
            is_short_audio_collection,
            from: Some(from.to_string()),
        }
    }

    /// Session-wide flags from `location`, with no `from` marker.
    pub fn carried(location: Option<&Location>) -> Self {
        Self {
            is_short_audio_collection: location
                .is_some_and(|location| location.state.is_short_audio_collection),
            from: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: StepPath,
    pub state: NavigationState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("no step is registered at `{path}`")]
    UnknownStep { path: String },
    #[error("wizard has not been started")]
    NotStarted,
}

/// In-memory location history used by the navigation controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<Location>,
}

impl History {
    pub fn go_to(&mut self, path: StepPath, state: NavigationState) {
        self.entries.push(Location { path, state });
    }

    /// Pops to the previous location. At the first entry there is nowhere to
    /// go and the history is left untouched.
    pub fn go_back(&mut self) -> Option<&Location> {
        if !self.can_go_back() {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
