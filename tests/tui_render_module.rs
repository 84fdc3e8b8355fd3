use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use virumap::country::{CountryCacheFile, CountryService, DisabledLocator, FixedTimezone};
use virumap::shared::{StepPath, WizardLog};
use virumap::steps::{default_flow, CONSENT_PATH, THANK_YOU_PATH};
use virumap::store::WizardStore;
use virumap::tui::draw_wizard;
use virumap::wizard::{AppContext, NavigationState, Services, Wizard, WizardView};

fn wizard_in(root: &std::path::Path) -> Wizard {
    let services = Services {
        country: CountryService::new(
            Arc::new(DisabledLocator),
            Arc::new(FixedTimezone("Asia/Tokyo".to_string())),
            CountryCacheFile::in_state_root(root),
        ),
        captcha_site_key: None,
    };
    let cx = AppContext::new(WizardStore::new(), services, WizardLog::disabled());
    Wizard::new(default_flow(None).expect("flow"), cx)
}

fn render(view: &WizardView) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).expect("terminal");
    terminal
        .draw(|frame| draw_wizard(frame, view))
        .expect("draw");
    let buffer = terminal.backend().buffer().clone();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tui_render_shows_header_body_and_disabled_action_bar() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path());
    wizard
        .start(
            &StepPath::parse(CONSENT_PATH).expect("path"),
            NavigationState::default(),
        )
        .expect("start");

    let screen = render(&wizard.view());
    assert!(screen.contains("< Back"));
    assert!(screen.contains("Consent"));
    assert!(screen.contains("/welcome/consent"));
    assert!(screen.contains("> I have read and agree to the consent form: [ ]"));
    assert!(screen.contains("[ Next ]"));
    assert!(screen.contains("Ctrl-C: quit"));
}

#[test]
fn tui_render_thank_you_has_no_action_bar_and_no_back() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut wizard = wizard_in(temp.path());
    wizard
        .start(
            &StepPath::parse(THANK_YOU_PATH).expect("path"),
            NavigationState::default(),
        )
        .expect("start");

    let screen = render(&wizard.view());
    assert!(!screen.contains("< Back"));
    assert!(!screen.contains("[ Next ]"));
    assert!(screen.contains("Thank you!"));
    assert!(screen.contains("Submission ID: "));
}
