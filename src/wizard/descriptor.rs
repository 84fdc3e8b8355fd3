use crate::shared::{StepPath, StoreKey};
use serde::{Deserialize, Serialize};

/// Which sample a recording step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordingLogic {
    #[serde(rename = "recordYourCough")]
    Cough,
    #[serde(rename = "recordYourBreath")]
    Breath,
    #[serde(rename = "recordYourSpeech")]
    Speech,
}

impl RecordingLogic {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingLogic::Cough => "recordYourCough",
            RecordingLogic::Breath => "recordYourBreath",
            RecordingLogic::Speech => "recordYourSpeech",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "recordYourCough" => Some(RecordingLogic::Cough),
            "recordYourBreath" => Some(RecordingLogic::Breath),
            "recordYourSpeech" => Some(RecordingLogic::Speech),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMetadata {
    pub current_logic: Option<RecordingLogic>,
}

/// Wiring handed to every step: where it lives, where it leads, and which
/// store slice it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub path: StepPath,
    pub previous_step: Option<StepPath>,
    pub next_step: Option<StepPath>,
    pub store_key: StoreKey,
    pub metadata: StepMetadata,
}

impl StepDescriptor {
    pub fn new(path: StepPath, store_key: StoreKey) -> Self {
        Self {
            path,
            previous_step: None,
            next_step: None,
            store_key,
            metadata: StepMetadata::default(),
        }
    }

    pub fn with_previous(mut self, previous: StepPath) -> Self {
        self.previous_step = Some(previous);
        self
    }

    pub fn with_next(mut self, next: StepPath) -> Self {
        self.next_step = Some(next);
        self
    }

    pub fn with_logic(mut self, logic: RecordingLogic) -> Self {
        self.metadata.current_logic = Some(logic);
        self
    }
}
