use crate::store::StoreSlice;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Present, not null, and not an empty string.
    Required,
    OneOf(&'static [&'static str]),
    NotOneOf(&'static [&'static str]),
    MustBeTrue,
}

impl Rule {
    fn check(&self, field: &str, value: Option<&Value>) -> Result<(), String> {
        let present = value.filter(|value| !is_blank(value));
        match self {
            Rule::Required => match present {
                Some(_) => Ok(()),
                None => Err(format!("{field} is a required field")),
            },
            Rule::OneOf(allowed) => match present {
                Some(value) if !allowed.iter().any(|candidate| value == candidate) => Err(format!(
                    "{field} must be one of the following values: {}",
                    allowed.join(", ")
                )),
                _ => Ok(()),
            },
            Rule::NotOneOf(denied) => match present {
                Some(value) if denied.iter().any(|candidate| value == candidate) => Err(format!(
                    "{field} must not be one of the following values: {}",
                    denied.join(", ")
                )),
                _ => Ok(()),
            },
            Rule::MustBeTrue => match value {
                Some(Value::Bool(true)) => Ok(()),
                _ => Err(format!("{field} must be true")),
            },
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(raw) => raw.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSchema {
    name: &'static str,
    rules: Vec<Rule>,
}

/// Declarative per-field validation for one step's form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldSchema {
            name,
            rules: rules.into_iter().collect(),
        });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Reports the first failing rule of every invalid field.
    pub fn validate(&self, values: &StoreSlice) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for field in &self.fields {
            let value = values.get(field.name);
            if let Some(message) = field
                .rules
                .iter()
                .find_map(|rule| rule.check(field.name, value).err())
            {
                errors.by_field.insert(field.name.to_string(), message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self, values: &StoreSlice) -> bool {
        self.validate(values).is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    by_field: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .by_field
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(raw: Value) -> StoreSlice {
        raw.as_object().cloned().expect("object")
    }

    #[test]
    fn reports_first_failing_rule_only() {
        let schema =
            Schema::new().field("illStatus", [Rule::Required, Rule::OneOf(&["yes", "no"])]);
        let errors = schema.validate(&values(json!({}))).expect_err("missing");
        assert_eq!(errors.get("illStatus"), Some("illStatus is a required field"));

        let errors = schema
            .validate(&values(json!({"illStatus": "maybe"})))
            .expect_err("not allowed");
        assert_eq!(
            errors.get("illStatus"),
            Some("illStatus must be one of the following values: yes, no")
        );
    }

    #[test]
    fn empty_string_and_null_count_as_missing() {
        let schema = Schema::new().field("zipCode", [Rule::Required]);
        assert!(!schema.is_valid(&values(json!({"zipCode": ""}))));
        assert!(!schema.is_valid(&values(json!({"zipCode": null}))));
        assert!(schema.is_valid(&values(json!({"zipCode": "1000"}))));
    }

    #[test]
    fn must_be_true_rejects_false_and_missing() {
        let schema = Schema::new().field("agreed", [Rule::MustBeTrue]);
        assert!(!schema.is_valid(&values(json!({}))));
        assert!(!schema.is_valid(&values(json!({"agreed": false}))));
        assert!(schema.is_valid(&values(json!({"agreed": true}))));
    }
}
