use crate::country::data::{consent_document_url, PRIVACY_POLICY_URL};
use crate::form::{FormState, Rule, Schema};
use crate::shared::StoreKey;
use crate::store::StoreSlice;
use crate::wizard::{
    apply_control_input, next_outcome, ActionButtons, AppContext, BackHandler, Button, Control,
    FieldInput, HeaderType, LogoSize, NavigationState, Step, StepDescriptor, StepOutcome,
    StepView, ViewBlock,
};
use serde_json::Value;

pub fn consent_schema() -> Schema {
    Schema::new()
        .field("agreedConsentTerms", [Rule::MustBeTrue])
        .field("agreedPolicyTerms", [Rule::MustBeTrue])
}

fn consent_defaults() -> StoreSlice {
    let mut defaults = StoreSlice::new();
    defaults.insert("agreedConsentTerms".to_string(), Value::Bool(false));
    defaults.insert("agreedPolicyTerms".to_string(), Value::Bool(false));
    defaults
}

/// Consent checkboxes. The linked document depends on the country chosen on
/// the welcome step.
pub struct ConsentStep {
    descriptor: StepDescriptor,
    welcome_key: StoreKey,
    form: FormState,
    focus: usize,
}

impl ConsentStep {
    pub fn new(descriptor: StepDescriptor, welcome_key: StoreKey) -> Self {
        Self {
            descriptor,
            welcome_key,
            form: FormState::with_defaults(consent_schema(), consent_defaults()),
            focus: 0,
        }
    }

    fn controls() -> [Control; 2] {
        [
            Control::checkbox(
                "agreedConsentTerms",
                "I have read and agree to the consent form",
            ),
            Control::checkbox(
                "agreedPolicyTerms",
                "I have read and agree to the privacy policy",
            ),
        ]
    }
}

impl Step for ConsentStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Step);
        cx.header.set_logo_size(LogoSize::Small);
        cx.header.set_type(HeaderType::Secondary);
        cx.header.set_title("");
        cx.header.set_subtitle("Consent");

        self.focus = 0;
        self.form.hydrate(cx.store.slice(&self.descriptor.store_key));
    }

    fn on_input(&mut self, input: FieldInput, _cx: &mut AppContext) {
        apply_control_input(&mut self.form, &Self::controls(), &mut self.focus, input);
    }

    fn on_primary(&mut self, cx: &mut AppContext) -> StepOutcome {
        let Some(values) = self.form.submit() else {
            return StepOutcome::Stay;
        };
        cx.update_store(&self.descriptor.store_key, values);
        next_outcome(&self.descriptor, NavigationState::carried(cx.location()))
    }

    fn action_buttons(&self, _cx: &AppContext) -> Option<ActionButtons> {
        Some(ActionButtons::primary(
            Button::new("Next").disabled_when(!self.form.is_valid()),
        ))
    }

    fn view(&self, cx: &AppContext) -> StepView {
        let country = cx
            .store
            .field(&self.welcome_key, "country")
            .and_then(Value::as_str);
        let mut view = StepView::default();
        view.paragraph(
            "Please read the consent form carefully. You must agree to both documents \
             before continuing.",
        );
        view.push(ViewBlock::Link {
            label: "Consent form".to_string(),
            url: consent_document_url(country).to_string(),
        });
        view.push(ViewBlock::Link {
            label: "Privacy policy".to_string(),
            url: PRIVACY_POLICY_URL.to_string(),
        });
        view.controls(&self.form, &Self::controls(), self.focus);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_checkboxes_must_be_ticked() {
        let schema = consent_schema();
        let one = json!({"agreedConsentTerms": true, "agreedPolicyTerms": false});
        let both = json!({"agreedConsentTerms": true, "agreedPolicyTerms": true});
        assert!(!schema.is_valid(one.as_object().expect("object")));
        assert!(schema.is_valid(both.as_object().expect("object")));
    }
}
