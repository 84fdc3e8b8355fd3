//! Reference tables consumed by country/language resolution and the welcome
//! step. Country names double as identifiers, matching what the geolocation
//! service returns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangOption {
    pub value: String,
    pub label: String,
}

pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español"),
    ("pt", "Português"),
    ("ja", "日本語"),
    ("ar", "العربية"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("it", "Italiano"),
    ("nl", "Nederlands"),
    ("hi", "हिन्दी"),
    ("ur", "اردو"),
];

pub const DEFAULT_LANGUAGE: &str = "en";

pub fn language_option(code: &str) -> Option<LangOption> {
    LANGUAGES
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(value, label)| LangOption {
            value: (*value).to_string(),
            label: (*label).to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub default_lang: &'static [&'static str],
    pub supported_lang: &'static [&'static str],
}

impl CountryInfo {
    pub fn default_languages(&self) -> Vec<LangOption> {
        self.default_lang
            .iter()
            .filter_map(|code| language_option(code))
            .collect()
    }

    pub fn supported_languages(&self) -> Vec<LangOption> {
        self.supported_lang
            .iter()
            .filter_map(|code| language_option(code))
            .collect()
    }

    pub fn first_default_language(&self) -> Option<&'static str> {
        self.default_lang.first().copied()
    }
}

const fn country(
    name: &'static str,
    default_lang: &'static [&'static str],
    supported_lang: &'static [&'static str],
) -> CountryInfo {
    CountryInfo {
        value: name,
        label: name,
        default_lang,
        supported_lang,
    }
}

pub const COUNTRIES: &[CountryInfo] = &[
    country("Argentina", &["es"], &["es", "en"]),
    country("Belgium", &["nl"], &["nl", "fr", "en"]),
    country("Brazil", &["pt"], &["pt", "en"]),
    country("Chile", &["es"], &["es", "en"]),
    country("Colombia", &["es"], &["es", "en"]),
    country("France", &["fr"], &["fr", "en"]),
    country("Germany", &["de"], &["de", "en"]),
    country("India", &["en"], &["en", "hi"]),
    country("Italy", &["it"], &["it", "en"]),
    country("Japan", &["ja"], &["ja", "en"]),
    country("Kuwait", &["ar"], &["ar", "en"]),
    country("Luxembourg", &["fr"], &["fr", "de", "en"]),
    country("Mexico", &["es"], &["es", "en"]),
    country("Netherlands", &["nl"], &["nl", "en"]),
    country("Pakistan", &["en"], &["en", "ur"]),
    country("Peru", &["es"], &["es", "en"]),
    country("Qatar", &["ar"], &["ar", "en"]),
    country("Saudi arabia", &["ar"], &["ar", "en"]),
    country("Singapore", &["en"], &["en"]),
    country("Spain", &["es"], &["es", "en"]),
    country("United arab emirates", &["ar"], &["ar", "en"]),
    country("United Kingdom", &["en"], &["en"]),
    country("United States", &["en"], &["en", "es"]),
];

/// Countries offered in the welcome step's country select.
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "Argentina",
    "Brazil",
    "Chile",
    "Colombia",
    "Japan",
    "Kuwait",
    "Mexico",
    "Peru",
    "Qatar",
    "Saudi arabia",
    "Singapore",
    "Spain",
    "United arab emirates",
    "United Kingdom",
    "United States",
];

/// Countries excluded from participation. Enforced by the welcome schema.
pub const INVALID_COUNTRIES: &[&str] = &[
    "India",
    "France",
    "Italy",
    "Netherlands",
    "Belgium",
    "Luxembourg",
    "Germany",
    "Pakistan",
];

pub fn country_info(name: &str) -> Option<&'static CountryInfo> {
    COUNTRIES.iter().find(|country| country.label == name)
}

pub fn supported_country_infos() -> impl Iterator<Item = &'static CountryInfo> {
    COUNTRIES
        .iter()
        .filter(|country| SUPPORTED_COUNTRIES.contains(&country.value))
}

const GLOBAL_CONSENT: &str =
    "https://drive.google.com/file/d/1hnxvDJ5qHBnUi7cnkNdyD4PuWMz8Ntss/view";

const CONSENT_DOCUMENTS: &[(&str, &str)] = &[
    (
        "Argentina",
        "https://drive.google.com/file/d/1slccHiR-vCc5mUHZgklTynejddO_IoCT/view",
    ),
    (
        "Colombia",
        "https://drive.google.com/file/d/1YMtfTiFdpg9tXhdWlQF8kh8Vu4q5RL1U/view",
    ),
    (
        "Qatar",
        "https://drive.google.com/file/d/1YMtfTiFdpg9tXhdWlQF8kh8Vu4q5RL1U/view",
    ),
    (
        "Japan",
        "https://drive.google.com/file/d/11RTMmnHW4SqHNf7htr3xuSi-o2v2vWlp/view",
    ),
    (
        "United States",
        "https://drive.google.com/file/d/166Fu8RKluJdkRaxPDfWPyCpM7BUIzmnE/view",
    ),
    ("Singapore", GLOBAL_CONSENT),
    ("Kuwait", GLOBAL_CONSENT),
    ("Saudi arabia", GLOBAL_CONSENT),
    ("United arab emirates", GLOBAL_CONSENT),
];

/// Consent document for `country`, falling back to the global one.
pub fn consent_document_url(country: Option<&str>) -> &'static str {
    country
        .and_then(|name| {
            CONSENT_DOCUMENTS
                .iter()
                .find(|(candidate, _)| *candidate == name)
                .map(|(_, url)| *url)
        })
        .unwrap_or(GLOBAL_CONSENT)
}

const REPORT_PROBLEM_FORMS: &[(&str, &str)] = &[(
    "es",
    "https://docs.google.com/forms/d/1svBSWjeLzFKpOuuau5RrdSO3jCiT-SCi-I02DxkNoEw/viewform",
)];

pub fn report_problem_url(language: &str) -> Option<&'static str> {
    REPORT_PROBLEM_FORMS
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, url)| *url)
}

pub const PRIVACY_POLICY_URL: &str = "https://virufy.org/privacy_policy";
