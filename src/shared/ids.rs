use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub fn validate_store_key(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("store key must be non-empty".to_string());
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err("store key must use only ASCII letters, digits, '-' or '_'".to_string())
}

pub fn validate_step_path(value: &str) -> Result<(), String> {
    let Some(rest) = value.strip_prefix('/') else {
        return Err(format!("step path `{value}` must start with '/'"));
    };
    if rest.is_empty() {
        return Err("step path must name at least one segment".to_string());
    }
    for segment in rest.split('/') {
        if segment.is_empty() {
            return Err(format!("step path `{value}` contains an empty segment"));
        }
        validate_store_key(segment)
            .map_err(|_| format!("step path segment `{segment}` has invalid characters"))?;
    }
    Ok(())
}

macro_rules! define_name_type {
    ($name:ident, $kind:literal, $validate:path) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, String> {
                $validate(raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<&str> for $name {
            type Error = String;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(|err| {
                    D::Error::custom(format!("invalid {} `{}`: {}", $kind, raw, err))
                })
            }
        }
    };
}

define_name_type!(StoreKey, "store key", validate_store_key);
define_name_type!(StepPath, "step path", validate_step_path);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_paths_require_leading_slash_and_clean_segments() {
        assert!(StepPath::parse("/welcome").is_ok());
        assert!(StepPath::parse("/submit-steps/record/cough").is_ok());
        assert!(StepPath::parse("welcome").is_err());
        assert!(StepPath::parse("/").is_err());
        assert!(StepPath::parse("/welcome//about").is_err());
        assert!(StepPath::parse("/we lcome").is_err());
    }

    #[test]
    fn store_keys_reject_separators() {
        assert!(StoreKey::parse("welcome").is_ok());
        assert!(StoreKey::parse("").is_err());
        assert!(StoreKey::parse("a/b").is_err());
    }
}
