use crate::captcha::{CaptchaGate, CaptchaVerification};
use crate::form::{FormState, Rule, Schema};
use crate::store::StoreSlice;
use crate::wizard::{
    apply_control_input, next_outcome, ActionButtons, AppContext, BackHandler, Button, Control,
    FieldInput, HeaderType, LogoSize, NavigationState, SelectOption, Step, StepDescriptor,
    StepEvent, StepOutcome, StepView, ViewBlock,
};
use serde_json::Value;

pub const ILL_STATUS_OPTIONS: &[&str] = &["yes", "no", "unsure"];
const CAPTCHA_FIELD: &str = "captchaToken";

pub fn questionary_schema() -> Schema {
    Schema::new()
        .field("illStatus", [Rule::Required, Rule::OneOf(ILL_STATUS_OPTIONS)])
        .field("zipCode", [Rule::Required])
}

fn questionary_defaults() -> StoreSlice {
    let mut defaults = StoreSlice::new();
    defaults.insert("illStatus".to_string(), Value::String(String::new()));
    defaults.insert("zipCode".to_string(), Value::String(String::new()));
    defaults
}

/// Short health questionnaire, optionally guarded by the CAPTCHA gate.
pub struct QuestionaryStep {
    descriptor: StepDescriptor,
    site_key: Option<String>,
    form: FormState,
    gate: CaptchaGate,
    focus: usize,
}

impl QuestionaryStep {
    pub fn new(descriptor: StepDescriptor, captcha_site_key: Option<&str>) -> Self {
        Self {
            descriptor,
            site_key: captcha_site_key.map(str::to_string),
            form: FormState::with_defaults(questionary_schema(), questionary_defaults()),
            gate: CaptchaGate::for_site_key(captcha_site_key),
            focus: 0,
        }
    }

    pub fn gate(&self) -> &CaptchaGate {
        &self.gate
    }

    fn can_submit(&self) -> bool {
        self.form.is_valid() && self.gate.permits_submit()
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![
            Control::select(
                "illStatus",
                "Are you currently feeling ill?",
                vec![
                    SelectOption::new("yes", "Yes"),
                    SelectOption::new("no", "No"),
                    SelectOption::new("unsure", "I'm not sure"),
                ],
            ),
            Control::text("zipCode", "Zip code", "Enter your zip code"),
        ];
        if matches!(
            self.gate.verification(),
            CaptchaVerification::Pending | CaptchaVerification::Verified(_)
        ) {
            controls.push(Control::text(
                CAPTCHA_FIELD,
                "Verification token",
                "Paste the CAPTCHA token",
            ));
        }
        controls
    }
}

impl Step for QuestionaryStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Step);
        cx.header.set_logo_size(LogoSize::Small);
        cx.header.set_type(HeaderType::Primary);
        cx.header.set_title("Questions");
        cx.header.set_subtitle("");

        self.focus = 0;
        self.form.hydrate(cx.store.slice(&self.descriptor.store_key));
        self.gate = CaptchaGate::for_site_key(self.site_key.as_deref());
    }

    fn on_input(&mut self, input: FieldInput, _cx: &mut AppContext) {
        let controls = self.controls();
        if apply_control_input(&mut self.form, &controls, &mut self.focus, input)
            == Some(CAPTCHA_FIELD)
        {
            let token = self.form.get_str(CAPTCHA_FIELD).map(str::to_string);
            self.gate.on_change(token);
        }
    }

    fn on_event(&mut self, event: StepEvent, cx: &mut AppContext) {
        match event {
            StepEvent::CaptchaToken(token) => {
                self.form.set_value(
                    CAPTCHA_FIELD,
                    Value::String(token.clone().unwrap_or_default()),
                );
                self.gate.on_change(token);
            }
            StepEvent::CaptchaErrored => self.gate.on_errored(&cx.log),
            StepEvent::CountryResolved(_) => {}
        }
    }

    fn on_primary(&mut self, cx: &mut AppContext) -> StepOutcome {
        if !self.gate.permits_submit() {
            return StepOutcome::Stay;
        }
        let Some(mut values) = self.form.submit() else {
            return StepOutcome::Stay;
        };
        values.remove(CAPTCHA_FIELD);
        cx.update_store(&self.descriptor.store_key, values);
        next_outcome(&self.descriptor, NavigationState::carried(cx.location()))
    }

    fn action_buttons(&self, _cx: &AppContext) -> Option<ActionButtons> {
        Some(ActionButtons::primary(
            Button::new("Next").disabled_when(!self.can_submit()),
        ))
    }

    fn view(&self, _cx: &AppContext) -> StepView {
        let mut view = StepView::default();
        view.paragraph("Answer a few questions about how you are feeling today.");
        view.controls(&self.form, &self.controls(), self.focus);
        match self.gate.verification() {
            CaptchaVerification::Pending => {
                view.push(ViewBlock::Notice(
                    "Complete the CAPTCHA verification to continue.".to_string(),
                ));
            }
            CaptchaVerification::Unavailable => {
                view.push(ViewBlock::Notice(
                    "Verification is unavailable; you can continue without it.".to_string(),
                ));
            }
            CaptchaVerification::NotRequired | CaptchaVerification::Verified(_) => {}
        }
        view
    }
}
