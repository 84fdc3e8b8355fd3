use super::cache::{CountryCacheFile, CountryResult};
use super::data::{country_info, LangOption};
use super::geolocation::GeoLocator;
use super::timezones::{country_for_timezone, TimezoneSource};
use crate::shared::WizardLog;
use crate::store::StoreSlice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    WizardRecord,
    CountryCache,
    Geolocation,
    Timezone,
    Unresolved,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionSource::WizardRecord => "wizard_record",
            ResolutionSource::CountryCache => "country_cache",
            ResolutionSource::Geolocation => "geolocation",
            ResolutionSource::Timezone => "timezone",
            ResolutionSource::Unresolved => "unresolved",
        }
    }
}

/// Values the welcome form is hydrated with. `None` leaves the field as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryResolution {
    pub country: Option<String>,
    pub language: Option<String>,
    pub supported_languages: Vec<LangOption>,
    pub source: ResolutionSource,
}

impl CountryResolution {
    pub fn summary(&self) -> String {
        format!(
            "source={} country={} language={} supported={}",
            self.source.as_str(),
            self.country.as_deref().unwrap_or("<none>"),
            self.language.as_deref().unwrap_or("<none>"),
            self.supported_languages
                .iter()
                .map(|lang| lang.value.as_str())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

/// Country plus the table's language defaults for it. Unknown countries keep
/// the name but get no languages.
pub fn resolution_for_country(
    country: Option<&str>,
    source: ResolutionSource,
) -> CountryResolution {
    let info = country.and_then(country_info);
    CountryResolution {
        country: country.map(str::to_string),
        language: info
            .and_then(|info| info.first_default_language())
            .map(str::to_string),
        supported_languages: info.map(|info| info.supported_languages()).unwrap_or_default(),
        source,
    }
}

/// Resolution from persisted local state only: the saved welcome answers
/// win, then the cached geolocation result.
pub fn resolve_local(
    welcome: Option<&StoreSlice>,
    cache: Option<&CountryResult>,
) -> Option<CountryResolution> {
    let saved_country = welcome
        .and_then(|slice| slice.get("country"))
        .and_then(|value| value.as_str())
        .filter(|country| !country.is_empty());
    if let Some(country) = saved_country {
        let language = welcome
            .and_then(|slice| slice.get("language"))
            .and_then(|value| value.as_str())
            .map(str::to_string);
        return Some(CountryResolution {
            country: Some(country.to_string()),
            language,
            supported_languages: cache.map(|cache| cache.supported.clone()).unwrap_or_default(),
            source: ResolutionSource::WizardRecord,
        });
    }

    let cache = cache?;
    Some(CountryResolution {
        country: cache.country.clone(),
        language: cache.lang.first().map(|lang| lang.value.clone()),
        supported_languages: cache.supported.clone(),
        source: ResolutionSource::CountryCache,
    })
}

/// Network lookup with the timezone fallback. Runs off the UI thread.
pub fn resolve_remote(
    locator: &dyn GeoLocator,
    timezone: &dyn TimezoneSource,
    cache: &CountryCacheFile,
    log: &WizardLog,
) -> CountryResolution {
    match locator.locate_country() {
        Ok(country) => {
            let info = country_info(&country);
            let record = CountryResult {
                country: Some(country.clone()),
                lang: info.map(|info| info.default_languages()).unwrap_or_default(),
                supported: info.map(|info| info.supported_languages()).unwrap_or_default(),
            };
            if let Err(err) = cache.save(&record) {
                log.warn("country.cache_write_failed", &err.to_string());
            }
            resolution_for_country(Some(&country), ResolutionSource::Geolocation)
        }
        Err(err) => {
            log.warn("country.lookup_failed", &err.to_string());
            let Some(zone) = timezone.timezone() else {
                log.warn("country.timezone_unavailable", "no timezone to fall back on");
                return resolution_for_country(None, ResolutionSource::Unresolved);
            };
            let country = country_for_timezone(&zone);
            if country.is_none() {
                log.warn(
                    "country.timezone_unmapped",
                    &format!("timezone {zone} has no country mapping"),
                );
            }
            resolution_for_country(country, ResolutionSource::Timezone)
        }
    }
}
