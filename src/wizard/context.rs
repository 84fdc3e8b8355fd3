use super::action_bar::ActionBar;
use super::header::HeaderState;
use super::navigation::{History, Location};
use crate::country::CountryService;
use crate::shared::{StoreKey, WizardLog};
use crate::store::{reset_store, update_action, StoreFile, StoreSlice, WizardStore};

/// Body scroll offset; reset on every step entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: u16,
}

impl Viewport {
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_by(&mut self, delta: i16) {
        self.offset = self.offset.saturating_add_signed(delta);
    }
}

/// Collaborators reachable from steps.
pub struct Services {
    pub country: CountryService,
    pub captcha_site_key: Option<String>,
}

/// Application state handed to every step hook. Created once per session and
/// passed explicitly; nothing here is global.
pub struct AppContext {
    pub store: WizardStore,
    pub header: HeaderState,
    pub action_bar: ActionBar,
    pub history: History,
    pub viewport: Viewport,
    pub language: String,
    pub services: Services,
    pub log: WizardLog,
    store_file: Option<StoreFile>,
}

impl AppContext {
    pub fn new(store: WizardStore, services: Services, log: WizardLog) -> Self {
        Self {
            store,
            header: HeaderState::default(),
            action_bar: ActionBar::default(),
            history: History::default(),
            viewport: Viewport::default(),
            language: crate::country::data::DEFAULT_LANGUAGE.to_string(),
            services,
            log,
            store_file: None,
        }
    }

    /// Mirrors every store mutation into `file`.
    pub fn with_store_file(mut self, file: StoreFile) -> Self {
        self.store_file = Some(file);
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.history.current()
    }

    pub fn update_store(&mut self, key: &StoreKey, partial: StoreSlice) {
        let fields = partial.keys().cloned().collect::<Vec<_>>().join(",");
        update_action(key.clone()).apply(&mut self.store, partial);
        self.log
            .info("store.update", &format!("key={key} fields={fields}"));
        self.persist();
    }

    pub fn reset_store(&mut self) {
        reset_store().apply(&mut self.store);
        self.log.info("store.reset", "all slices cleared");
        self.persist();
    }

    fn persist(&self) {
        let Some(file) = &self.store_file else {
            return;
        };
        if let Err(err) = file.save(&self.store) {
            self.log.error("store.persist_failed", &err.to_string());
        }
    }
}
