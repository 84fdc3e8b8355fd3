//! Country and language resolution for the welcome step.

pub mod cache;
pub mod data;
pub mod geolocation;
pub mod resolver;
pub mod timezones;
pub mod worker;

use crate::shared::WizardLog;
use crate::store::StoreSlice;
use std::sync::Arc;
use std::time::Duration;

pub use cache::{CacheError, CountryCacheFile, CountryResult, COUNTRY_RESULT_FILE_NAME};
pub use data::{country_info, CountryInfo, LangOption, INVALID_COUNTRIES, SUPPORTED_COUNTRIES};
pub use geolocation::{DisabledLocator, GeoError, GeoLocator, IpWhoIsLocator};
pub use resolver::{
    resolution_for_country, resolve_local, resolve_remote, CountryResolution, ResolutionSource,
};
pub use timezones::{FixedTimezone, SystemTimezone, TimezoneSource};
pub use worker::{LookupWorker, Polled};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStart {
    Ready(CountryResolution),
    Pending { generation: u64 },
}

/// Owns the lookup collaborators and the background worker.
pub struct CountryService {
    locator: Arc<dyn GeoLocator>,
    timezone: Arc<dyn TimezoneSource>,
    cache: CountryCacheFile,
    worker: LookupWorker,
}

impl CountryService {
    pub fn new(
        locator: Arc<dyn GeoLocator>,
        timezone: Arc<dyn TimezoneSource>,
        cache: CountryCacheFile,
    ) -> Self {
        Self {
            locator,
            timezone,
            cache,
            worker: LookupWorker::new(),
        }
    }

    pub fn cache(&self) -> &CountryCacheFile {
        &self.cache
    }

    pub fn is_pending(&self) -> bool {
        self.worker.is_pending()
    }

    /// Resolves from local state when possible; otherwise starts a lookup
    /// and returns its generation. Any earlier lookup is superseded.
    pub fn begin(&mut self, welcome: Option<&StoreSlice>, log: &WizardLog) -> ResolutionStart {
        self.worker.cancel();
        let cached = match self.cache.load() {
            Ok(cached) => cached,
            Err(err) => {
                log.warn("country.cache_read_failed", &err.to_string());
                None
            }
        };
        if let Some(resolution) = resolve_local(welcome, cached.as_ref()) {
            log.info("country.resolved", &resolution.summary());
            return ResolutionStart::Ready(resolution);
        }

        let locator = Arc::clone(&self.locator);
        let timezone = Arc::clone(&self.timezone);
        let cache = self.cache.clone();
        let job_log = log.clone();
        let generation = self.worker.spawn(move || {
            resolve_remote(locator.as_ref(), timezone.as_ref(), &cache, &job_log)
        });
        log.info(
            "country.lookup_started",
            &format!("generation={generation}"),
        );
        ResolutionStart::Pending { generation }
    }

    pub fn poll(&mut self, log: &WizardLog) -> Option<CountryResolution> {
        let polled = self.worker.poll();
        Self::report(polled, log)
    }

    pub fn wait(&mut self, timeout: Duration, log: &WizardLog) -> Option<CountryResolution> {
        let polled = self.worker.wait(timeout);
        Self::report(polled, log)
    }

    pub fn cancel(&mut self, log: &WizardLog) {
        if self.worker.is_pending() {
            self.worker.cancel();
            log.info(
                "country.lookup_cancelled",
                &format!("generation={}", self.worker.generation()),
            );
        }
    }

    fn report(polled: Polled, log: &WizardLog) -> Option<CountryResolution> {
        for _ in 0..polled.discarded {
            log.info(
                "country.stale_result_discarded",
                "lookup finished after it was superseded",
            );
        }
        if let Some(resolution) = &polled.ready {
            log.info("country.resolved", &resolution.summary());
        }
        polled.ready
    }
}
