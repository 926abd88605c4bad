use crate::result::{RamboError, Result};
use chrono::FixedOffset;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static OFFSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-](?:[01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());

pub struct CliParser;

impl CliParser {
    pub fn validate_time_offset(input: &str) -> Result<FixedOffset> {
        if !OFFSET_REGEX.is_match(input) {
            return Err(RamboError::Config(
                format!(
                    "Time offset '{}' is invalid, expected '+HH:MM' or '-HH:MM'",
                    input
                )
                .into(),
            ));
        }

        FixedOffset::from_str(input).map_err(|e| {
            RamboError::Config(format!("Time offset '{}' is invalid: {}", input, e).into())
        })
    }

    pub fn validate_format(format: &str) -> Result<()> {
        if format.trim().is_empty() {
            return Err(RamboError::Config("Rename format cannot be empty".into()));
        }

        // A format producing path separators would move files into other
        // directories instead of renaming them in place.
        if format.contains('/') || format.contains('\\') {
            return Err(RamboError::Config(
                "Rename format must not contain path separators".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_and_negative_offsets() {
        let positive = CliParser::validate_time_offset("+01:00").unwrap();
        assert_eq!(positive.local_minus_utc(), 3600);

        let negative = CliParser::validate_time_offset("-02:30").unwrap();
        assert_eq!(negative.local_minus_utc(), -9000);
    }

    #[test]
    fn rejects_malformed_offsets() {
        for input in ["01:00", "+1:00", "+25:00", "+01:60", "+01", "utc"] {
            assert!(
                CliParser::validate_time_offset(input).is_err(),
                "offset '{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn rejects_empty_and_path_producing_formats() {
        assert!(CliParser::validate_format("").is_err());
        assert!(CliParser::validate_format("   ").is_err());
        assert!(CliParser::validate_format("%Y/%m/%d").is_err());
        assert!(CliParser::validate_format("%Y\\%m").is_err());
    }

    #[test]
    fn accepts_default_format() {
        assert!(CliParser::validate_format("%Y-%m-%d_%H-%M-%S").is_ok());
    }
}
