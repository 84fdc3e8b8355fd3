//! Text-only screens between the welcome step and consent.

use crate::wizard::{
    next_outcome, ActionButtons, AppContext, BackHandler, Button, HeaderType, LogoSize,
    NavigationState, Step, StepDescriptor, StepOutcome, StepView, ViewBlock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoKind {
    About,
    BeforeStart,
}

pub struct InfoStep {
    descriptor: StepDescriptor,
    kind: InfoKind,
}

impl InfoStep {
    pub fn about(descriptor: StepDescriptor) -> Self {
        Self {
            descriptor,
            kind: InfoKind::About,
        }
    }

    pub fn before_start(descriptor: StepDescriptor) -> Self {
        Self {
            descriptor,
            kind: InfoKind::BeforeStart,
        }
    }
}

impl Step for InfoStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Step);
        cx.header.set_logo_size(LogoSize::Small);
        cx.header.set_type(HeaderType::Secondary);
        match self.kind {
            InfoKind::About => {
                cx.header.set_title("Virufy");
                cx.header.set_subtitle("About us");
            }
            InfoKind::BeforeStart => {
                cx.header.set_title("");
                cx.header.set_subtitle("Before you start");
            }
        }
    }

    fn on_primary(&mut self, cx: &mut AppContext) -> StepOutcome {
        next_outcome(&self.descriptor, NavigationState::carried(cx.location()))
    }

    fn action_buttons(&self, _cx: &AppContext) -> Option<ActionButtons> {
        let label = match self.kind {
            InfoKind::About => "Next",
            InfoKind::BeforeStart => "Start",
        };
        Some(ActionButtons::primary(Button::new(label)))
    }

    fn view(&self, _cx: &AppContext) -> StepView {
        let mut view = StepView::default();
        match self.kind {
            InfoKind::About => {
                view.push(ViewBlock::Heading("Help us fight COVID-19".to_string()));
                view.paragraph(
                    "Virufy is a nonprofit research organization building AI that screens \
                     for COVID-19 from the sound of a cough.",
                );
                view.paragraph(
                    "We are collecting cough, breath and speech samples from volunteers \
                     around the world. Every sample helps train and validate the model.",
                );
                view.paragraph("The whole process takes about five minutes.");
            }
            InfoKind::BeforeStart => {
                view.push(ViewBlock::Heading("Please follow these steps".to_string()));
                view.push(ViewBlock::Bullets(vec![
                    "Find a quiet place with no background noise.".to_string(),
                    "Hold the device about 30 cm from your mouth.".to_string(),
                    "Cough away from other people and cover your mouth when not recording."
                        .to_string(),
                    "Wash your hands and disinfect the device afterwards.".to_string(),
                ]));
                view.paragraph(
                    "If you feel unwell at any point, stop and seek medical attention.",
                );
            }
        }
        view
    }
}
