use crate::domain::model::TimestampFormat;
use crate::utils::error::{DeliveryError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const DISTRICT_PATTERN: &str = r"^district\d+$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn district_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DISTRICT_PATTERN).expect("district pattern is a valid regex"))
}

/// `district<N>`, lower-case, as typed at the prompt.
pub fn is_valid_district(value: &str) -> bool {
    district_regex().is_match(value)
}

pub fn validate_district(field_name: &str, value: &str) -> Result<()> {
    if !is_valid_district(value) {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("District must match {}", DISTRICT_PATTERN),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_timestamp_format(field_name: &str, format: &TimestampFormat) -> Result<()> {
    if !format.is_well_formed() {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.pattern().to_string(),
            reason: "Not a valid strftime pattern".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Supported values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DeliveryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
