use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipwho.is/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("geolocation request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("geolocation request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("geolocation response from {url} could not be parsed: {message}")]
    Parse { url: String, message: String },
    #[error("geolocation service rejected the lookup: {message}")]
    Rejected { message: String },
    #[error("geolocation response did not name a country")]
    MissingCountry,
    #[error("geolocation lookups are disabled")]
    Disabled,
}

/// Resolves the visitor's country name from their network address.
pub trait GeoLocator: Send + Sync {
    fn locate_country(&self) -> Result<String, GeoError>;
}

#[derive(Debug, Deserialize)]
struct IpWhoIsResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Unauthenticated lookup against an ipwho.is-compatible endpoint.
#[derive(Debug, Clone)]
pub struct IpWhoIsLocator {
    url: String,
    timeout: Duration,
}

impl IpWhoIsLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl GeoLocator for IpWhoIsLocator {
    fn locate_country(&self) -> Result<String, GeoError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(&self.url)
            .set("accept", "application/json")
            .set("user-agent", concat!("virumap/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => GeoError::Status {
                    url: self.url.clone(),
                    status,
                },
                other => GeoError::Request {
                    url: self.url.clone(),
                    message: other.to_string(),
                },
            })?;

        let body = response
            .into_json::<IpWhoIsResponse>()
            .map_err(|e| GeoError::Parse {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        country_from_response(body)
    }
}

fn country_from_response(body: IpWhoIsResponse) -> Result<String, GeoError> {
    if body.success == Some(false) {
        return Err(GeoError::Rejected {
            message: body
                .message
                .unwrap_or_else(|| "lookup unsuccessful".to_string()),
        });
    }
    body.country
        .map(|country| country.trim().to_string())
        .filter(|country| !country.is_empty())
        .ok_or(GeoError::MissingCountry)
}

/// Locator used when lookups are turned off in config; always fails so the
/// timezone fallback runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLocator;

impl GeoLocator for DisabledLocator {
    fn locate_country(&self) -> Result<String, GeoError> {
        Err(GeoError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> IpWhoIsResponse {
        serde_json::from_str(raw).expect("response json")
    }

    #[test]
    fn successful_response_yields_country() {
        let body = parse(r#"{"ip":"1.2.3.4","success":true,"country":"Argentina"}"#);
        assert_eq!(country_from_response(body), Ok("Argentina".to_string()));
    }

    #[test]
    fn rate_limited_response_is_rejected() {
        let body = parse(r#"{"success":false,"message":"You've hit the monthly limit"}"#);
        assert_eq!(
            country_from_response(body),
            Err(GeoError::Rejected {
                message: "You've hit the monthly limit".to_string()
            })
        );
    }

    #[test]
    fn blank_country_is_missing() {
        let body = parse(r#"{"country":"  "}"#);
        assert_eq!(country_from_response(body), Err(GeoError::MissingCountry));
    }
}
