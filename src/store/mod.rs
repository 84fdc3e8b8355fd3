//! Keyed form store shared by every wizard step.
//!
//! Each step owns one slice, addressed by its [`StoreKey`]. Writes go through
//! [`UpdateAction`] (shallow merge) and [`ResetAction`] (clear everything).
//! The store does not validate anything; each step's schema does.

pub mod persistence;

use crate::shared::StoreKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use persistence::{StoreError, StoreFile, WIZARD_RECORD_FILE_NAME};

pub type StoreSlice = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WizardStore {
    slices: BTreeMap<String, StoreSlice>,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slice(&self, key: &StoreKey) -> Option<&StoreSlice> {
        self.slices.get(key.as_str())
    }

    pub fn field(&self, key: &StoreKey, field: &str) -> Option<&Value> {
        self.slice(key).and_then(|slice| slice.get(field))
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    fn merge(&mut self, key: &StoreKey, partial: StoreSlice) {
        let slice = self.slices.entry(key.as_str().to_string()).or_default();
        for (field, value) in partial {
            slice.insert(field, value);
        }
    }

    fn clear(&mut self) {
        self.slices.clear();
    }
}

/// Update bound to a single slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    key: StoreKey,
}

impl UpdateAction {
    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Shallow-merges `partial` into the bound slice: top-level fields present
    /// in `partial` replace the stored ones, all other fields survive.
    pub fn apply(&self, store: &mut WizardStore, partial: StoreSlice) {
        store.merge(&self.key, partial);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetAction;

impl ResetAction {
    pub fn apply(&self, store: &mut WizardStore) {
        store.clear();
    }
}

pub fn update_action(key: StoreKey) -> UpdateAction {
    UpdateAction { key }
}

pub fn reset_store() -> ResetAction {
    ResetAction
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partial(value: Value) -> StoreSlice {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn nested_objects_are_replaced_not_deep_merged() {
        let key = StoreKey::parse("recording").expect("key");
        let mut store = WizardStore::new();
        let update = update_action(key.clone());
        update.apply(
            &mut store,
            partial(json!({"recordYourCough": {"recordingFile": "a.wav", "extra": 1}})),
        );
        update.apply(
            &mut store,
            partial(json!({"recordYourCough": {"recordingFile": "b.wav"}})),
        );
        assert_eq!(
            store.field(&key, "recordYourCough"),
            Some(&json!({"recordingFile": "b.wav"}))
        );
    }
}
