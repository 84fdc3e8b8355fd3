use crate::wizard::{
    ActionButtons, AppContext, BackHandler, HeaderType, LogoSize, Step, StepDescriptor,
    StepOutcome, StepView, ViewBlock,
};
use getrandom::getrandom;

const SUBMISSION_ID_MIN: u32 = 100_000;
const SUBMISSION_ID_SPACE: u32 = 900_000;

/// Six-digit id shown to the participant, in `100000..=999999`.
pub fn generate_submission_id() -> Result<u32, String> {
    let mut bytes = [0_u8; 4];
    getrandom(&mut bytes)
        .map_err(|err| format!("failed to generate submission id randomness: {err}"))?;
    Ok(SUBMISSION_ID_MIN + u32::from_le_bytes(bytes) % SUBMISSION_ID_SPACE)
}

/// Terminal screen. Clears the store on entry so the next participant starts
/// from scratch.
pub struct ThankYouStep {
    descriptor: StepDescriptor,
    submission_id: Option<u32>,
}

impl ThankYouStep {
    pub fn new(descriptor: StepDescriptor) -> Self {
        Self {
            descriptor,
            submission_id: None,
        }
    }

    pub fn submission_id(&self) -> Option<u32> {
        self.submission_id
    }
}

impl Step for ThankYouStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Hidden);
        cx.header.set_logo_size(LogoSize::Regular);
        cx.header.set_type(HeaderType::Tertiary);
        cx.header.set_title("");
        cx.header.set_subtitle("");

        cx.reset_store();
        self.submission_id = match generate_submission_id() {
            Ok(id) => {
                cx.log.info("submission.completed", &format!("id={id}"));
                Some(id)
            }
            Err(err) => {
                cx.log.error("submission.id_failed", &err);
                None
            }
        };
    }

    fn on_primary(&mut self, _cx: &mut AppContext) -> StepOutcome {
        StepOutcome::Stay
    }

    fn on_back(&mut self, _cx: &mut AppContext) -> StepOutcome {
        StepOutcome::Stay
    }

    fn action_buttons(&self, _cx: &AppContext) -> Option<ActionButtons> {
        None
    }

    fn view(&self, _cx: &AppContext) -> StepView {
        let mut view = StepView::default();
        view.push(ViewBlock::Heading("Thank you!".to_string()));
        view.paragraph("Your samples have been submitted. Thank you for helping the research.");
        if let Some(id) = self.submission_id {
            view.push(ViewBlock::Notice(format!("Submission ID: {id}")));
        }
        view.paragraph("Press Ctrl-C to exit.");
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_id_is_six_digits() {
        for _ in 0..64 {
            let id = generate_submission_id().expect("id");
            assert!((100_000..=999_999).contains(&id));
            assert_eq!(id.to_string().len(), 6);
        }
    }
}
