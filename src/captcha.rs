//! Gate around the third-party CAPTCHA widget. The widget itself is opaque:
//! it hands back a token through `on_change` or fails through `on_errored`.

use crate::shared::WizardLog;

/// Destination for errors that should reach an error-tracking service.
pub trait ErrorReporter {
    fn capture(&self, message: &str);
}

impl ErrorReporter for WizardLog {
    fn capture(&self, message: &str) {
        self.error("error_reporter.capture", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptchaVerification {
    NotRequired,
    Pending,
    Verified(String),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaGate {
    state: CaptchaVerification,
}

impl CaptchaGate {
    /// A gate is only required when a site key is configured.
    pub fn for_site_key(site_key: Option<&str>) -> Self {
        let state = match site_key.map(str::trim) {
            Some(key) if !key.is_empty() => CaptchaVerification::Pending,
            _ => CaptchaVerification::NotRequired,
        };
        Self { state }
    }

    pub fn verification(&self) -> &CaptchaVerification {
        &self.state
    }

    pub fn is_required(&self) -> bool {
        self.state != CaptchaVerification::NotRequired
    }

    pub fn on_change(&mut self, token: Option<String>) {
        if matches!(
            self.state,
            CaptchaVerification::NotRequired | CaptchaVerification::Unavailable
        ) {
            return;
        }
        self.state = match token.filter(|token| !token.trim().is_empty()) {
            Some(token) => CaptchaVerification::Verified(token),
            None => CaptchaVerification::Pending,
        };
    }

    /// The widget failed to load or verify. Submission stops depending on it.
    pub fn on_errored(&mut self, reporter: &dyn ErrorReporter) {
        if self.state == CaptchaVerification::NotRequired {
            return;
        }
        self.state = CaptchaVerification::Unavailable;
        reporter.capture("Error on ReCAPTCHA");
    }

    pub fn permits_submit(&self) -> bool {
        !matches!(self.state, CaptchaVerification::Pending)
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            CaptchaVerification::Verified(token) => Some(token),
            _ => None,
        }
    }
}
