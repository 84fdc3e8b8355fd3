use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use virumap::country::{
    CountryCacheFile, CountryResult, CountryService, FixedTimezone, GeoError, GeoLocator,
    LangOption,
};
use virumap::shared::{StepPath, StoreKey, WizardLog};
use virumap::steps::{
    default_flow, ABOUT_PATH, BEFORE_START_PATH, CONSENT_PATH, QUESTIONARY_PATH,
    RECORD_BREATH_PATH, RECORD_COUGH_PATH, RECORD_SPEECH_PATH, THANK_YOU_PATH, WELCOME_PATH,
};
use virumap::store::{StoreFile, WizardStore};
use virumap::wizard::{
    AppContext, FieldInput, HeaderType, NavigationState, Services, StepEvent, ViewBlock, Wizard,
    WizardAction,
};

const SETTLE: Duration = Duration::from_secs(5);

struct FakeLocator {
    calls: AtomicUsize,
    answer: Result<String, GeoError>,
}

impl GeoLocator for FakeLocator {
    fn locate_country(&self) -> Result<String, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn locator(answer: Result<String, GeoError>) -> Arc<FakeLocator> {
    Arc::new(FakeLocator {
        calls: AtomicUsize::new(0),
        answer,
    })
}

fn wizard_in(root: &Path, locator: Arc<FakeLocator>, site_key: Option<&str>) -> Wizard {
    let services = Services {
        country: CountryService::new(
            locator,
            Arc::new(FixedTimezone("America/Sao_Paulo".to_string())),
            CountryCacheFile::in_state_root(root),
        ),
        captcha_site_key: site_key.map(str::to_string),
    };
    let cx = AppContext::new(WizardStore::new(), services, WizardLog::disabled())
        .with_store_file(StoreFile::in_state_root(root));
    Wizard::new(default_flow(site_key).expect("flow"), cx)
}

fn path(raw: &str) -> StepPath {
    StepPath::parse(raw).expect("path")
}

fn at(wizard: &Wizard) -> &str {
    wizard.active_path().map(StepPath::as_str).unwrap_or("")
}

fn primary(wizard: &mut Wizard) {
    wizard.dispatch(WizardAction::Primary).expect("primary");
}

fn input(wizard: &mut Wizard, input: FieldInput) {
    wizard.dispatch(WizardAction::Input(input)).expect("input");
}

fn type_text(wizard: &mut Wizard, text: &str) {
    for ch in text.chars() {
        input(wizard, FieldInput::Char(ch));
    }
}

fn primary_enabled(wizard: &Wizard) -> bool {
    wizard.context().action_bar.primary_enabled()
}

fn start_at_welcome(wizard: &mut Wizard) {
    wizard
        .start(&path(WELCOME_PATH), NavigationState::default())
        .expect("start");
    wizard.settle(SETTLE);
}

fn fill_questionary(wizard: &mut Wizard) {
    input(wizard, FieldInput::OptionNext);
    input(wizard, FieldInput::FocusNext);
    type_text(wizard, "1407");
}

fn record(wizard: &mut Wizard, file: &str) {
    type_text(wizard, file);
    primary(wizard);
}

#[test]
fn steps_flow_runs_to_thank_you_and_resets_the_store() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Ok("Argentina".to_string())), None);
    start_at_welcome(&mut wizard);

    let welcome = StoreKey::parse("welcome").expect("key");
    assert_eq!(wizard.context().language, "es");
    assert_eq!(wizard.context().header.header_type, HeaderType::Null);
    assert!(!wizard.context().header.back_visible());
    assert!(primary_enabled(&wizard));
    primary(&mut wizard);
    assert_eq!(at(&wizard), ABOUT_PATH);
    assert_eq!(
        wizard.context().store.field(&welcome, "country"),
        Some(&json!("Argentina"))
    );
    assert!(StoreFile::in_state_root(temp.path())
        .load()
        .expect("load")
        .is_some());

    primary(&mut wizard);
    assert_eq!(at(&wizard), BEFORE_START_PATH);
    assert_eq!(wizard.context().header.title, "");
    primary(&mut wizard);
    assert_eq!(at(&wizard), CONSENT_PATH);

    assert!(!primary_enabled(&wizard));
    input(&mut wizard, FieldInput::Toggle);
    assert!(!primary_enabled(&wizard));
    input(&mut wizard, FieldInput::FocusNext);
    input(&mut wizard, FieldInput::Toggle);
    assert!(primary_enabled(&wizard));
    let consent_link = wizard.view().body.blocks.into_iter().find_map(|block| match block {
        ViewBlock::Link { label, url } if label == "Consent form" => Some(url),
        _ => None,
    });
    assert!(consent_link
        .expect("consent link")
        .contains("1slccHiR-vCc5mUHZgklTynejddO_IoCT"));
    primary(&mut wizard);
    assert_eq!(at(&wizard), QUESTIONARY_PATH);

    assert_eq!(wizard.context().header.title, "Questions");
    fill_questionary(&mut wizard);
    primary(&mut wizard);
    assert_eq!(at(&wizard), RECORD_COUGH_PATH);

    record(&mut wizard, "cough.wav");
    assert_eq!(at(&wizard), RECORD_BREATH_PATH);
    let location = wizard.context().location().expect("location");
    assert_eq!(location.state.from.as_deref(), Some("step-record"));
    let recording = StoreKey::parse("recording").expect("key");
    assert_eq!(
        wizard.context().store.field(&recording, "recordYourCough"),
        Some(&json!({"recordingFile": "cough.wav", "uploadedFile": null}))
    );

    record(&mut wizard, "breath.wav");
    assert_eq!(at(&wizard), RECORD_SPEECH_PATH);
    record(&mut wizard, "speech.wav");
    assert_eq!(at(&wizard), THANK_YOU_PATH);

    let cx = wizard.context();
    assert!(cx.store.is_empty());
    assert!(cx.action_bar.mounted().is_none());
    assert_eq!(cx.header.header_type, HeaderType::Tertiary);
    assert!(!cx.header.back_visible());
    let persisted = StoreFile::in_state_root(temp.path())
        .load()
        .expect("load")
        .expect("record");
    assert!(persisted.is_empty());

    let id = wizard
        .view()
        .body
        .blocks
        .into_iter()
        .find_map(|block| match block {
            ViewBlock::Notice(text) => text.strip_prefix("Submission ID: ").map(str::to_string),
            _ => None,
        })
        .expect("submission id");
    assert_eq!(id.len(), 6);
    let id: u32 = id.parse().expect("numeric id");
    assert!((100_000..=999_999).contains(&id));
}

#[test]
fn steps_flow_welcome_uses_cached_country_without_lookup() {
    let temp = tempfile::tempdir().expect("tempdir");
    CountryCacheFile::in_state_root(temp.path())
        .save(&CountryResult {
            country: Some("Japan".to_string()),
            lang: vec![LangOption {
                value: "ja".to_string(),
                label: "日本語".to_string(),
            }],
            supported: vec![
                LangOption {
                    value: "ja".to_string(),
                    label: "日本語".to_string(),
                },
                LangOption {
                    value: "en".to_string(),
                    label: "English".to_string(),
                },
            ],
        })
        .expect("seed cache");
    let fake = locator(Ok("Argentina".to_string()));
    let mut wizard = wizard_in(temp.path(), fake.clone(), None);
    start_at_welcome(&mut wizard);

    assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.context().language, "ja");
    assert!(primary_enabled(&wizard));
}

#[test]
fn steps_flow_welcome_blocks_deny_listed_country_and_recovers_on_change() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Ok("India".to_string())), None);
    start_at_welcome(&mut wizard);
    assert!(!primary_enabled(&wizard));
    primary(&mut wizard);
    assert_eq!(at(&wizard), WELCOME_PATH);

    // Focus the country select and pick the first supported country.
    input(&mut wizard, FieldInput::FocusNext);
    input(&mut wizard, FieldInput::OptionNext);
    assert!(primary_enabled(&wizard));
    assert_eq!(wizard.context().language, "es");
}

#[test]
fn steps_flow_welcome_falls_back_to_timezone_when_lookup_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Err(GeoError::MissingCountry)), None);
    start_at_welcome(&mut wizard);
    assert_eq!(wizard.context().language, "pt");
    primary(&mut wizard);
    let welcome = StoreKey::parse("welcome").expect("key");
    assert_eq!(
        wizard.context().store.field(&welcome, "country"),
        Some(&json!("Brazil"))
    );
}

#[test]
fn steps_flow_questionary_waits_for_captcha_until_it_errors() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(
        temp.path(),
        locator(Ok("Argentina".to_string())),
        Some("site-key"),
    );
    wizard
        .start(&path(QUESTIONARY_PATH), NavigationState::default())
        .expect("start");
    fill_questionary(&mut wizard);
    assert!(!primary_enabled(&wizard));

    wizard.notify(StepEvent::CaptchaToken(Some("token-1".to_string())));
    assert!(primary_enabled(&wizard));
    wizard.notify(StepEvent::CaptchaToken(None));
    assert!(!primary_enabled(&wizard));

    wizard.notify(StepEvent::CaptchaErrored);
    assert!(primary_enabled(&wizard));
    primary(&mut wizard);
    assert_eq!(at(&wizard), RECORD_COUGH_PATH);
    let questionary = StoreKey::parse("questionary").expect("key");
    let slice = wizard.context().store.slice(&questionary).expect("slice");
    assert_eq!(slice.get("illStatus"), Some(&json!("yes")));
    assert!(slice.get("captchaToken").is_none());
}

#[test]
fn steps_flow_recording_carries_short_audio_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Ok("Argentina".to_string())), None);
    wizard
        .start(
            &path(RECORD_COUGH_PATH),
            NavigationState {
                is_short_audio_collection: true,
                from: None,
            },
        )
        .expect("start");
    assert!(!primary_enabled(&wizard));
    record(&mut wizard, "short.wav");
    let location = wizard.context().location().expect("location");
    assert_eq!(location.path.as_str(), RECORD_BREATH_PATH);
    assert!(location.state.is_short_audio_collection);
}

#[test]
fn steps_flow_short_audio_flag_survives_from_welcome_to_recording_and_back() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Ok("Argentina".to_string())), None);
    wizard
        .start(
            &path(WELCOME_PATH),
            NavigationState {
                is_short_audio_collection: true,
                from: None,
            },
        )
        .expect("start");
    wizard.settle(SETTLE);

    primary(&mut wizard);
    primary(&mut wizard);
    primary(&mut wizard);
    assert_eq!(at(&wizard), CONSENT_PATH);
    input(&mut wizard, FieldInput::Toggle);
    input(&mut wizard, FieldInput::FocusNext);
    input(&mut wizard, FieldInput::Toggle);
    primary(&mut wizard);
    assert_eq!(at(&wizard), QUESTIONARY_PATH);
    fill_questionary(&mut wizard);
    primary(&mut wizard);
    assert_eq!(at(&wizard), RECORD_COUGH_PATH);
    let location = wizard.context().location().expect("location");
    assert!(location.state.is_short_audio_collection);

    record(&mut wizard, "cough.wav");
    assert_eq!(at(&wizard), RECORD_BREATH_PATH);
    wizard.dispatch(WizardAction::Back).expect("back");
    let location = wizard.context().location().expect("location");
    assert_eq!(location.path.as_str(), RECORD_COUGH_PATH);
    assert!(location.state.is_short_audio_collection);
}

#[test]
fn steps_flow_welcome_clears_header_text_when_returning_from_about() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path(), locator(Ok("Argentina".to_string())), None);
    start_at_welcome(&mut wizard);
    primary(&mut wizard);
    assert_eq!(at(&wizard), ABOUT_PATH);
    assert_eq!(wizard.context().header.subtitle, "About us");

    wizard.dispatch(WizardAction::Back).expect("back");
    wizard.settle(SETTLE);
    assert_eq!(at(&wizard), WELCOME_PATH);
    let header = &wizard.context().header;
    assert_eq!(header.header_type, HeaderType::Null);
    assert_eq!(header.title, "");
    assert_eq!(header.subtitle, "");
}
