//! The concrete screens and the default flow that links them.

pub mod consent;
pub mod info;
pub mod questionary;
pub mod recording;
pub mod thank_you;
pub mod welcome;

use crate::shared::{StepPath, StoreKey};
use crate::wizard::{RecordingLogic, Step, StepDescriptor};

pub const WELCOME_PATH: &str = "/welcome";
pub const ABOUT_PATH: &str = "/welcome/about";
pub const BEFORE_START_PATH: &str = "/welcome/before-start";
pub const CONSENT_PATH: &str = "/welcome/consent";
pub const QUESTIONARY_PATH: &str = "/submit-steps/questionary";
pub const RECORD_COUGH_PATH: &str = "/submit-steps/record/cough";
pub const RECORD_BREATH_PATH: &str = "/submit-steps/record/breath";
pub const RECORD_SPEECH_PATH: &str = "/submit-steps/record/speech";
pub const THANK_YOU_PATH: &str = "/submit-steps/thank-you";

pub const WELCOME_KEY: &str = "welcome";
pub const ABOUT_KEY: &str = "about";
pub const BEFORE_START_KEY: &str = "beforeStart";
pub const CONSENT_KEY: &str = "consent";
pub const QUESTIONARY_KEY: &str = "questionary";
pub const RECORDING_KEY: &str = "recording";
pub const SUBMISSION_KEY: &str = "submission";

/// Ordered route table: path, store key, recording logic.
const FLOW: &[(&str, &str, Option<RecordingLogic>)] = &[
    (WELCOME_PATH, WELCOME_KEY, None),
    (ABOUT_PATH, ABOUT_KEY, None),
    (BEFORE_START_PATH, BEFORE_START_KEY, None),
    (CONSENT_PATH, CONSENT_KEY, None),
    (QUESTIONARY_PATH, QUESTIONARY_KEY, None),
    (RECORD_COUGH_PATH, RECORDING_KEY, Some(RecordingLogic::Cough)),
    (RECORD_BREATH_PATH, RECORDING_KEY, Some(RecordingLogic::Breath)),
    (RECORD_SPEECH_PATH, RECORDING_KEY, Some(RecordingLogic::Speech)),
    (THANK_YOU_PATH, SUBMISSION_KEY, None),
];

pub fn default_start_path() -> Result<StepPath, String> {
    StepPath::parse(WELCOME_PATH)
}

/// Descriptors for the linear flow. The first step has no previous step and
/// the thank-you screen is a dead end in both directions.
pub fn flow_descriptors() -> Result<Vec<StepDescriptor>, String> {
    let mut descriptors = Vec::with_capacity(FLOW.len());
    for (idx, (path, key, logic)) in FLOW.iter().enumerate() {
        let mut descriptor = StepDescriptor::new(StepPath::parse(path)?, StoreKey::parse(key)?);
        let is_terminal = *path == THANK_YOU_PATH;
        if idx > 0 && !is_terminal {
            descriptor = descriptor.with_previous(StepPath::parse(FLOW[idx - 1].0)?);
        }
        if let Some((next, _, _)) = FLOW.get(idx + 1) {
            descriptor = descriptor.with_next(StepPath::parse(next)?);
        }
        if let Some(logic) = logic {
            descriptor = descriptor.with_logic(*logic);
        }
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

pub fn default_flow(captcha_site_key: Option<&str>) -> Result<Vec<Box<dyn Step>>, String> {
    let welcome_key = StoreKey::parse(WELCOME_KEY)?;
    let mut steps: Vec<Box<dyn Step>> = Vec::with_capacity(FLOW.len());
    for descriptor in flow_descriptors()? {
        let path = descriptor.path.as_str().to_string();
        let step: Box<dyn Step> = match path.as_str() {
            WELCOME_PATH => Box::new(welcome::WelcomeStep::new(descriptor)),
            ABOUT_PATH => Box::new(info::InfoStep::about(descriptor)),
            BEFORE_START_PATH => Box::new(info::InfoStep::before_start(descriptor)),
            CONSENT_PATH => Box::new(consent::ConsentStep::new(descriptor, welcome_key.clone())),
            QUESTIONARY_PATH => Box::new(questionary::QuestionaryStep::new(
                descriptor,
                captcha_site_key,
            )),
            THANK_YOU_PATH => Box::new(thank_you::ThankYouStep::new(descriptor)),
            _ => Box::new(recording::RecordingStep::new(descriptor)?),
        };
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_links_each_step_to_its_neighbours() {
        let descriptors = flow_descriptors().expect("descriptors");
        assert_eq!(descriptors.len(), FLOW.len());
        assert!(descriptors[0].previous_step.is_none());
        assert_eq!(
            descriptors[0].next_step.as_ref().map(StepPath::as_str),
            Some(ABOUT_PATH)
        );
        let last = descriptors.last().expect("last");
        assert_eq!(last.path.as_str(), THANK_YOU_PATH);
        assert!(last.previous_step.is_none());
        assert!(last.next_step.is_none());
        let breath = descriptors
            .iter()
            .find(|descriptor| descriptor.path.as_str() == RECORD_BREATH_PATH)
            .expect("breath");
        assert_eq!(breath.metadata.current_logic, Some(RecordingLogic::Breath));
        assert_eq!(breath.store_key.as_str(), RECORDING_KEY);
    }
}
