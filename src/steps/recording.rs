//! Cough, breath and speech collection. One step type serves all three,
//! keyed by `metadata.current_logic`; the samples share one store slice.

use crate::form::{FormState, Rule, Schema};
use crate::store::StoreSlice;
use crate::wizard::{
    apply_control_input, next_outcome, ActionButtons, AppContext, BackHandler, Button, Control,
    FieldInput, HeaderType, LogoSize, NavigationState, RecordingLogic, Step, StepDescriptor,
    StepOutcome, StepView, ViewBlock,
};
use serde_json::{Map, Value};

pub const FROM_RECORD_STEP: &str = "step-record";
pub const COUGH_EXAMPLE_VIDEO_URL: &str = "https://www.youtube-nocookie.com/embed/Pk0gwtR6JLw";

pub fn recording_schema() -> Schema {
    Schema::new().field("recordingFile", [Rule::Required])
}

fn recording_defaults() -> StoreSlice {
    let mut defaults = StoreSlice::new();
    defaults.insert("recordingFile".to_string(), Value::String(String::new()));
    defaults
}

pub struct RecordingStep {
    descriptor: StepDescriptor,
    logic: RecordingLogic,
    form: FormState,
    focus: usize,
}

impl RecordingStep {
    pub fn new(descriptor: StepDescriptor) -> Result<Self, String> {
        let logic = descriptor.metadata.current_logic.ok_or_else(|| {
            format!(
                "recording step `{}` requires metadata.current_logic",
                descriptor.path
            )
        })?;
        Ok(Self {
            descriptor,
            logic,
            form: FormState::with_defaults(recording_schema(), recording_defaults()),
            focus: 0,
        })
    }

    pub fn logic(&self) -> RecordingLogic {
        self.logic
    }

    fn title(&self) -> &'static str {
        match self.logic {
            RecordingLogic::Cough => "Record your cough",
            RecordingLogic::Breath => "Record your breath",
            RecordingLogic::Speech => "Record your speech",
        }
    }

    fn instructions(&self) -> Vec<String> {
        let lines: &[&str] = match self.logic {
            RecordingLogic::Cough => &[
                "Take a deep breath and cough three times.",
                "Keep the microphone 30 cm from your mouth.",
                "Wait a second of silence before stopping the recording.",
            ],
            RecordingLogic::Breath => &[
                "Breathe in and out deeply through your mouth five times.",
                "Keep the microphone 30 cm from your mouth.",
            ],
            RecordingLogic::Speech => &[
                "Read the following sentence aloud in your normal voice:",
                "\"The quick brown fox jumps over the lazy dog.\"",
            ],
        };
        lines.iter().map(|line| (*line).to_string()).collect()
    }

    fn controls() -> [Control; 1] {
        [Control::text(
            "recordingFile",
            "Recording file",
            "Path to the audio file",
        )]
    }

    fn stored_sample<'a>(&self, cx: &'a AppContext) -> Option<&'a StoreSlice> {
        cx.store
            .field(&self.descriptor.store_key, self.logic.as_str())
            .and_then(Value::as_object)
    }
}

impl Step for RecordingStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Step);
        cx.header.set_logo_size(LogoSize::Small);
        cx.header.set_type(HeaderType::Primary);
        cx.header.set_title(self.title());
        cx.header.set_subtitle("");

        self.focus = 0;
        let stored = self.stored_sample(cx).cloned();
        self.form.hydrate(stored.as_ref());
    }

    fn on_input(&mut self, input: FieldInput, _cx: &mut AppContext) {
        apply_control_input(&mut self.form, &Self::controls(), &mut self.focus, input);
    }

    fn on_primary(&mut self, cx: &mut AppContext) -> StepOutcome {
        let Some(values) = self.form.submit() else {
            return StepOutcome::Stay;
        };
        let recording_file = values.get("recordingFile").cloned().unwrap_or(Value::Null);
        let mut sample = Map::new();
        sample.insert("recordingFile".to_string(), recording_file);
        sample.insert("uploadedFile".to_string(), Value::Null);
        let mut partial = StoreSlice::new();
        partial.insert(self.logic.as_str().to_string(), Value::Object(sample));
        cx.update_store(&self.descriptor.store_key, partial);

        let is_short = cx
            .location()
            .is_some_and(|location| location.state.is_short_audio_collection);
        next_outcome(
            &self.descriptor,
            NavigationState::from_step(FROM_RECORD_STEP, is_short),
        )
    }

    fn action_buttons(&self, _cx: &AppContext) -> Option<ActionButtons> {
        Some(ActionButtons::primary(
            Button::new("Continue").disabled_when(!self.form.is_valid()),
        ))
    }

    fn view(&self, cx: &AppContext) -> StepView {
        let mut view = StepView::default();
        view.push(ViewBlock::Bullets(self.instructions()));
        if self.logic == RecordingLogic::Cough {
            view.push(ViewBlock::Link {
                label: "Watch how to record your cough".to_string(),
                url: COUGH_EXAMPLE_VIDEO_URL.to_string(),
            });
        }
        if cx
            .location()
            .is_some_and(|location| location.state.is_short_audio_collection)
        {
            view.push(ViewBlock::Notice(
                "Short audio collection: a few seconds is enough.".to_string(),
            ));
        }
        view.controls(&self.form, &Self::controls(), self.focus);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{StepPath, StoreKey};

    #[test]
    fn recording_step_requires_logic_metadata() {
        let descriptor = StepDescriptor::new(
            StepPath::parse("/submit-steps/record/cough").expect("path"),
            StoreKey::parse("recording").expect("key"),
        );
        assert!(RecordingStep::new(descriptor.clone()).is_err());
        let step = RecordingStep::new(descriptor.with_logic(RecordingLogic::Breath))
            .expect("step");
        assert_eq!(step.logic(), RecordingLogic::Breath);
    }
}
