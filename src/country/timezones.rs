use chrono_tz::Tz;
use std::path::Path;

/// City segment of an IANA name → participating country.
pub const TIMEZONE_COUNTRIES: &[(&str, &str)] = &[
    ("Buenos_Aires", "Argentina"),
    ("Cordoba", "Argentina"),
    ("Mendoza", "Argentina"),
    ("Sao_Paulo", "Brazil"),
    ("Bahia", "Brazil"),
    ("Fortaleza", "Brazil"),
    ("Manaus", "Brazil"),
    ("Recife", "Brazil"),
    ("Santiago", "Chile"),
    ("Bogota", "Colombia"),
    ("Lima", "Peru"),
    ("Mexico_City", "Mexico"),
    ("Monterrey", "Mexico"),
    ("Tijuana", "Mexico"),
    ("New_York", "United States"),
    ("Chicago", "United States"),
    ("Denver", "United States"),
    ("Phoenix", "United States"),
    ("Los_Angeles", "United States"),
    ("Anchorage", "United States"),
    ("Honolulu", "United States"),
    ("Detroit", "United States"),
    ("Tokyo", "Japan"),
    ("Qatar", "Qatar"),
    ("Kuwait", "Kuwait"),
    ("Riyadh", "Saudi arabia"),
    ("Dubai", "United arab emirates"),
    ("Singapore", "Singapore"),
    ("London", "United Kingdom"),
    ("Madrid", "Spain"),
    ("Kolkata", "India"),
    ("Calcutta", "India"),
    ("Karachi", "Pakistan"),
    ("Paris", "France"),
    ("Berlin", "Germany"),
    ("Rome", "Italy"),
    ("Amsterdam", "Netherlands"),
    ("Brussels", "Belgium"),
    ("Luxembourg", "Luxembourg"),
];

pub fn city_of(timezone: &str) -> &str {
    timezone.rsplit('/').next().unwrap_or(timezone)
}

pub fn country_for_timezone(timezone: &str) -> Option<&'static str> {
    let city = city_of(timezone);
    TIMEZONE_COUNTRIES
        .iter()
        .find(|(candidate, _)| *candidate == city)
        .map(|(_, country)| *country)
}

pub fn is_known_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}

pub trait TimezoneSource: Send + Sync {
    fn timezone(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimezone(pub String);

impl TimezoneSource for FixedTimezone {
    fn timezone(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Host timezone from `TZ`, `/etc/timezone`, or the `/etc/localtime` link.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimezone;

impl TimezoneSource for SystemTimezone {
    fn timezone(&self) -> Option<String> {
        let from_env = std::env::var("TZ")
            .ok()
            .map(|raw| raw.trim_start_matches(':').trim().to_string());
        let from_file = || {
            std::fs::read_to_string("/etc/timezone")
                .ok()
                .map(|raw| raw.trim().to_string())
        };
        let from_link = || timezone_from_localtime_link(Path::new("/etc/localtime"));

        [from_env, from_file(), from_link()]
            .into_iter()
            .flatten()
            .find(|candidate| is_known_timezone(candidate))
    }
}

fn timezone_from_localtime_link(path: &Path) -> Option<String> {
    let target = std::fs::read_link(path).ok()?;
    let target = target.to_string_lossy();
    let (_, name) = target.split_once("zoneinfo/")?;
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_country_from_city_segment() {
        assert_eq!(city_of("America/Sao_Paulo"), "Sao_Paulo");
        assert_eq!(city_of("America/Argentina/Buenos_Aires"), "Buenos_Aires");
        assert_eq!(country_for_timezone("America/Sao_Paulo"), Some("Brazil"));
        assert_eq!(
            country_for_timezone("America/Argentina/Buenos_Aires"),
            Some("Argentina")
        );
        assert_eq!(country_for_timezone("Antarctica/Troll"), None);
    }

    #[test]
    fn validates_names_against_the_tz_database() {
        assert!(is_known_timezone("America/Sao_Paulo"));
        assert!(!is_known_timezone("Mars/Olympus_Mons"));
    }
}
