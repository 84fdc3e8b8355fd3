use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use virumap::country::{
    resolve_local, resolve_remote, CountryCacheFile, CountryResult, CountryService,
    FixedTimezone, GeoError, GeoLocator, LangOption, ResolutionSource, ResolutionStart,
};
use virumap::shared::{wizard_log_path, WizardLog};

struct CountingLocator {
    calls: AtomicUsize,
    answer: Result<String, GeoError>,
}

impl CountingLocator {
    fn new(answer: Result<String, GeoError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer,
        }
    }
}

impl GeoLocator for CountingLocator {
    fn locate_country(&self) -> Result<String, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Fails once released, so the test controls when the job finishes.
struct GatedLocator {
    release: Mutex<Receiver<()>>,
}

impl GeoLocator for GatedLocator {
    fn locate_country(&self) -> Result<String, GeoError> {
        if let Ok(release) = self.release.lock() {
            let _ = release.recv();
        }
        Err(GeoError::Disabled)
    }
}

fn lang(value: &str, label: &str) -> LangOption {
    LangOption {
        value: value.to_string(),
        label: label.to_string(),
    }
}

#[test]
fn country_resolver_uses_cache_without_network_call() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cache = CountryCacheFile::in_state_root(temp.path());
    cache
        .save(&CountryResult {
            country: Some("Brazil".to_string()),
            lang: vec![lang("pt", "Português")],
            supported: vec![lang("pt", "Português"), lang("en", "English")],
        })
        .expect("seed cache");
    let locator = Arc::new(CountingLocator::new(Ok("Japan".to_string())));
    let mut service = CountryService::new(
        locator.clone(),
        Arc::new(FixedTimezone("Asia/Tokyo".to_string())),
        cache,
    );

    let resolution = match service.begin(None, &WizardLog::disabled()) {
        ResolutionStart::Ready(resolution) => resolution,
        other => panic!("expected a local resolution, got {other:?}"),
    };
    assert_eq!(resolution.source, ResolutionSource::CountryCache);
    assert_eq!(resolution.country.as_deref(), Some("Brazil"));
    assert_eq!(resolution.language.as_deref(), Some("pt"));
    assert_eq!(resolution.supported_languages.len(), 2);
    assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn country_resolver_saved_welcome_answers_win_over_cache() {
    let welcome = json!({"country": "Chile", "language": "en"});
    let cache = CountryResult {
        country: Some("Brazil".to_string()),
        lang: vec![lang("pt", "Português")],
        supported: vec![lang("pt", "Português"), lang("en", "English")],
    };
    let resolution =
        resolve_local(welcome.as_object(), Some(&cache)).expect("local resolution");
    assert_eq!(resolution.source, ResolutionSource::WizardRecord);
    assert_eq!(resolution.country.as_deref(), Some("Chile"));
    assert_eq!(resolution.language.as_deref(), Some("en"));
    assert_eq!(resolution.supported_languages, cache.supported);

    assert!(resolve_local(None, None).is_none());
}

#[test]
fn country_resolver_geolocation_argentina_sets_defaults_and_writes_cache() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cache = CountryCacheFile::in_state_root(temp.path());
    let resolution = resolve_remote(
        &CountingLocator::new(Ok("Argentina".to_string())),
        &FixedTimezone("Asia/Tokyo".to_string()),
        &cache,
        &WizardLog::disabled(),
    );
    assert_eq!(resolution.source, ResolutionSource::Geolocation);
    assert_eq!(resolution.country.as_deref(), Some("Argentina"));
    assert_eq!(resolution.language.as_deref(), Some("es"));
    assert_eq!(
        resolution
            .supported_languages
            .iter()
            .map(|lang| lang.value.as_str())
            .collect::<Vec<_>>(),
        vec!["es", "en"]
    );

    let cached = cache.load().expect("load cache").expect("cache written");
    assert_eq!(cached.country.as_deref(), Some("Argentina"));
    assert_eq!(cached.lang, vec![lang("es", "Español")]);
}

#[test]
fn country_resolver_falls_back_to_timezone_after_lookup_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cache = CountryCacheFile::in_state_root(temp.path());
    let log = WizardLog::to_file(wizard_log_path(temp.path()));
    let resolution = resolve_remote(
        &CountingLocator::new(Err(GeoError::Status {
            url: "https://ipwho.is/".to_string(),
            status: 429,
        })),
        &FixedTimezone("America/Sao_Paulo".to_string()),
        &cache,
        &log,
    );
    assert_eq!(resolution.source, ResolutionSource::Timezone);
    assert_eq!(resolution.country.as_deref(), Some("Brazil"));
    assert_eq!(resolution.language.as_deref(), Some("pt"));
    assert!(cache.load().expect("load").is_none());

    let raw = std::fs::read_to_string(wizard_log_path(temp.path())).expect("read log");
    assert!(raw.contains("country.lookup_failed"));
}

#[test]
fn country_resolver_discards_result_of_cancelled_lookup() {
    let temp = tempfile::tempdir().expect("tempdir");
    let log = WizardLog::to_file(wizard_log_path(temp.path()));
    let (release_tx, release_rx) = channel();
    let mut service = CountryService::new(
        Arc::new(GatedLocator {
            release: Mutex::new(release_rx),
        }),
        Arc::new(FixedTimezone("America/Buenos_Aires".to_string())),
        CountryCacheFile::in_state_root(temp.path()),
    );

    let start = service.begin(None, &log);
    assert_eq!(start, ResolutionStart::Pending { generation: 1 });
    service.cancel(&log);
    assert!(!service.is_pending());
    release_tx.send(()).expect("release lookup");

    let log_path = wizard_log_path(temp.path());
    let mut discarded = false;
    for _ in 0..200 {
        assert!(service.poll(&log).is_none());
        let raw = std::fs::read_to_string(&log_path).unwrap_or_default();
        if raw.contains("country.stale_result_discarded") {
            discarded = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(discarded, "stale result was never discarded");
}
