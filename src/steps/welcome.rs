use crate::country::data::{
    report_problem_url, supported_country_infos, DEFAULT_LANGUAGE, PRIVACY_POLICY_URL,
};
use crate::country::{
    country_info, CountryResolution, LangOption, ResolutionStart, INVALID_COUNTRIES,
};
use crate::form::{FormState, Rule, Schema};
use crate::store::StoreSlice;
use crate::wizard::{
    apply_control_input, next_outcome, ActionButtons, AppContext, BackHandler, Button, Control,
    FieldInput, HeaderType, LogoSize, NavigationState, SelectOption, Step, StepDescriptor,
    StepEvent, StepOutcome, StepView, ViewBlock,
};
use serde_json::Value;

pub fn welcome_schema() -> Schema {
    Schema::new()
        .field("country", [Rule::Required, Rule::NotOneOf(INVALID_COUNTRIES)])
        .field("language", [Rule::Required])
}

fn welcome_defaults() -> StoreSlice {
    let mut defaults = StoreSlice::new();
    defaults.insert("country".to_string(), Value::String(String::new()));
    defaults.insert(
        "language".to_string(),
        Value::String(DEFAULT_LANGUAGE.to_string()),
    );
    defaults
}

/// Country and language selection. Seeds both fields from local state or a
/// background lookup when entered.
pub struct WelcomeStep {
    descriptor: StepDescriptor,
    form: FormState,
    supported_languages: Vec<LangOption>,
    focus: usize,
    resolving: bool,
}

impl WelcomeStep {
    pub fn new(descriptor: StepDescriptor) -> Self {
        Self {
            descriptor,
            form: FormState::with_defaults(welcome_schema(), welcome_defaults()),
            supported_languages: Vec::new(),
            focus: 0,
            resolving: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn supported_languages(&self) -> &[LangOption] {
        &self.supported_languages
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    fn controls(&self) -> Vec<Control> {
        let languages = self
            .supported_languages
            .iter()
            .map(|lang| SelectOption::new(&lang.value, &lang.label))
            .collect();
        let countries = supported_country_infos()
            .map(|info| SelectOption::new(info.value, info.label))
            .collect();
        vec![
            Control::select("language", "Language", languages)
                .disabled_when(self.supported_languages.len() <= 1),
            Control::select("country", "Location", countries),
        ]
    }

    fn apply_resolution(&mut self, resolution: CountryResolution, cx: &mut AppContext) {
        if let Some(country) = resolution.country {
            self.form.set_value("country", Value::String(country));
        }
        if let Some(language) = resolution.language {
            self.form.set_value("language", Value::String(language));
        }
        if !resolution.supported_languages.is_empty() {
            self.supported_languages = resolution.supported_languages;
        } else if let Some(info) = self.form.get_str("country").and_then(country_info) {
            self.supported_languages = info.supported_languages();
        }
        self.sync_language(cx);
    }

    fn select_country(&mut self, cx: &mut AppContext) {
        let Some(info) = self.form.get_str("country").and_then(country_info) else {
            return;
        };
        self.supported_languages = info.supported_languages();
        if let Some(language) = info.first_default_language() {
            self.form
                .set_value("language", Value::String(language.to_string()));
        }
        self.sync_language(cx);
    }

    fn sync_language(&self, cx: &mut AppContext) {
        if let Some(language) = self.form.get_str("language").filter(|lang| !lang.is_empty()) {
            cx.language = language.to_string();
        }
    }
}

impl Step for WelcomeStep {
    fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    fn on_enter(&mut self, cx: &mut AppContext) {
        cx.header.set_back(BackHandler::Hidden);
        cx.header.set_logo_size(LogoSize::Regular);
        cx.header.set_type(HeaderType::Null);
        cx.header.set_title("");
        cx.header.set_subtitle("");

        self.focus = 0;
        self.form.hydrate(cx.store.slice(&self.descriptor.store_key));

        let start = cx
            .services
            .country
            .begin(cx.store.slice(&self.descriptor.store_key), &cx.log);
        match start {
            ResolutionStart::Ready(resolution) => {
                self.resolving = false;
                self.apply_resolution(resolution, cx);
            }
            ResolutionStart::Pending { .. } => self.resolving = true,
        }
    }

    fn on_exit(&mut self, cx: &mut AppContext) {
        cx.services.country.cancel(&cx.log);
        self.resolving = false;
    }

    fn on_input(&mut self, input: FieldInput, cx: &mut AppContext) {
        let controls = self.controls();
        match apply_control_input(&mut self.form, &controls, &mut self.focus, input) {
            Some("country") => self.select_country(cx),
            Some("language") => self.sync_language(cx),
            _ => {}
        }
    }

    fn on_event(&mut self, event: StepEvent, cx: &mut AppContext) {
        match event {
            StepEvent::CountryResolved(resolution) => {
                self.resolving = false;
                self.apply_resolution(resolution, cx);
            }
            StepEvent::CaptchaToken(_) | StepEvent::CaptchaErrored => {}
        }
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
        let mut view = StepView::default();
        view.push(ViewBlock::Heading("Virufy".to_string()));
        view.controls(&self.form, &self.controls(), self.focus);
        if self.resolving {
            view.push(ViewBlock::Notice("Detecting your location...".to_string()));
        }
        if let Some(country) = self
            .form
            .get_str("country")
            .filter(|country| INVALID_COUNTRIES.contains(country))
        {
            view.push(ViewBlock::Notice(format!(
                "Participation from {country} is not currently possible."
            )));
        }
        view.paragraph(
            "Please note: This form is for data collection only. It will not predict or diagnose \
             any disease, disorder, or other health condition. Virufy is conducting research and \
             will use the information you provide for research. The Virufy app doesn't replace a \
             doctor. Remember that it is your responsibility to seek medical advice from your doctor.",
        );
        view.push(ViewBlock::Link {
            label: "By proceeding you accept the terms of our Privacy Policy".to_string(),
            url: PRIVACY_POLICY_URL.to_string(),
        });
        if let Some(url) = report_problem_url(&cx.language) {
            view.push(ViewBlock::Link {
                label: "Report a problem".to_string(),
                url: url.to_string(),
            });
        }
        view
    }
}
