//! Phone number composition for summaries.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::countries;

/// Dial code assumed when the country field does not resolve.
pub const DEFAULT_DIAL_CODE: &str = "+1";

/// Failure of a phone formatting service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// No formatting service is installed
    #[error("Phone formatting service unavailable")]
    Unavailable,
    /// The service rejected the number
    #[error("Invalid phone number '{0}'")]
    Invalid(String),
}

/// Locale-aware phone formatting service.
pub trait PhoneFormatter: fmt::Debug + Send + Sync {
    /// Formats `number` in international notation. `region` is an ISO
    /// 3166-1 alpha-2 hint.
    fn format_international(
        &self,
        number: &str,
        region: Option<&str>,
    ) -> Result<String, PhoneError>;
}

/// Formatter used when no service is installed: always unavailable, so
/// composition falls back to the fixed groupings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhoneService;

impl PhoneFormatter for NoPhoneService {
    fn format_international(&self, _: &str, _: Option<&str>) -> Result<String, PhoneError> {
        Err(PhoneError::Unavailable)
    }
}

/// Composes the display value of a phone number and its country field.
///
/// Empty phones compose to the empty string. The service is tried first;
/// on failure a `+1` number with exactly ten digits is grouped as
/// `+1 (xxx) xxx-xxxx` and anything else is shown as `<code> <raw>`.
pub fn compose(formatter: &dyn PhoneFormatter, phone: &str, country: &str) -> String {
    let phone = phone.trim();
    if phone.is_empty() {
        return String::new();
    }

    let target = countries::resolve(country);
    let region = target.as_ref().and_then(|t| t.region);
    let dial_code = target
        .as_ref()
        .map(|t| t.dial_code.as_str())
        .unwrap_or(DEFAULT_DIAL_CODE);

    match formatter.format_international(phone, region) {
        Ok(formatted) => formatted,
        Err(e) => {
            debug!("{e}; using fallback phone grouping");
            fallback(phone, dial_code)
        }
    }
}

fn fallback(phone: &str, dial_code: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if dial_code == DEFAULT_DIAL_CODE && digits.len() == 10 {
        format!(
            "+1 ({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..]
        )
    } else {
        format!("{dial_code} {phone}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Prefixing;

    impl PhoneFormatter for Prefixing {
        fn format_international(
            &self,
            number: &str,
            region: Option<&str>,
        ) -> Result<String, PhoneError> {
            match region {
                Some("GB") => Ok(format!("+44 {number}")),
                _ => Err(PhoneError::Invalid(number.to_string())),
            }
        }
    }

    #[test]
    fn test_us_grouping_fallback() {
        assert_eq!(compose(&NoPhoneService, "5551234567", "US"), "+1 (555) 123-4567");
        assert_eq!(compose(&NoPhoneService, "(555) 123-4567", ""), "+1 (555) 123-4567");
    }

    #[test]
    fn test_naive_concatenation_fallback() {
        assert_eq!(compose(&NoPhoneService, "30 1234567", "DE"), "+49 30 1234567");
        assert_eq!(compose(&NoPhoneService, "555123", "US"), "+1 555123");
    }

    #[test]
    fn test_empty_phone_composes_to_empty() {
        assert_eq!(compose(&NoPhoneService, "  ", "US"), "");
    }

    #[test]
    fn test_service_preferred_over_fallback() {
        assert_eq!(compose(&Prefixing, "20 7946 0958", "GB"), "+44 20 7946 0958");
        assert_eq!(compose(&Prefixing, "5551234567", "US"), "+1 (555) 123-4567");
    }
}
