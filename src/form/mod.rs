//! Form values, declarative validation and the per-step form state that
//! drives the action bar's disabled flag.

pub mod schema;

use crate::store::StoreSlice;
use serde_json::Value;
use std::collections::BTreeSet;

pub use schema::{Rule, Schema, ValidationErrors};

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: Schema,
    defaults: StoreSlice,
    values: StoreSlice,
    errors: ValidationErrors,
    touched: BTreeSet<String>,
}

impl FormState {
    pub fn new(schema: Schema) -> Self {
        Self::with_defaults(schema, StoreSlice::new())
    }

    pub fn with_defaults(schema: Schema, defaults: StoreSlice) -> Self {
        let mut form = Self {
            schema,
            values: defaults.clone(),
            defaults,
            errors: ValidationErrors::default(),
            touched: BTreeSet::new(),
        };
        form.revalidate();
        form
    }

    /// Resets to defaults, then overlays the stored slice if there is one.
    pub fn hydrate(&mut self, stored: Option<&StoreSlice>) {
        self.values = self.defaults.clone();
        if let Some(stored) = stored {
            for (field, value) in stored {
                self.values.insert(field.clone(), value.clone());
            }
        }
        self.touched.clear();
        self.revalidate();
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
        self.touched.insert(field.to_string());
        self.revalidate();
    }

    /// Programmatic assignment (resolution, cascading selects); does not
    /// mark the field as touched.
    pub fn set_value(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
        self.revalidate();
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(Value::as_str)
    }

    pub fn get_bool(&self, field: &str) -> bool {
        self.values
            .get(field)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn values(&self) -> &StoreSlice {
        &self.values
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Error for display: only fields the user has edited show messages.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.touched.contains(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// The validated values, or `None` while the schema reports errors.
    pub fn submit(&self) -> Option<StoreSlice> {
        if self.is_valid() {
            Some(self.values.clone())
        } else {
            None
        }
    }

    fn revalidate(&mut self) {
        self.errors = match self.schema.validate(&self.values) {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors,
        };
    }
}
