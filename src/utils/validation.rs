use crate::utils::error::{ReviewError, Result};
use serde_json::Value;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReviewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReviewError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReviewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ReviewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReviewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(ReviewError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 檢查請求中的必填欄位，一次回報所有缺漏的欄位。
///
/// A field counts as missing when the key is absent, its value is `null`, or
/// its value is the empty string. Anything else (`"0"`, `0`, `false`, `[]`,
/// whitespace) is present. A non-object `data` has every field missing.
pub fn validate_required_fields(data: &Value, required_fields: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required_fields
        .iter()
        .copied()
        .filter(|field| match data.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect();

    if !missing.is_empty() {
        return Err(ReviewError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_max_length(label: &str, value: &str, max_length: usize) -> Result<()> {
    if value.chars().count() > max_length {
        return Err(ReviewError::validation(format!(
            "{} exceeds maximum length of {} characters",
            label, max_length
        )));
    }
    Ok(())
}
