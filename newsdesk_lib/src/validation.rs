use url::Url;

use crate::error::NewsdeskError;

pub const MAX_SOURCE_ID_LENGTH: usize = 64;
pub const MAX_URL_LENGTH: usize = 2048;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, NewsdeskError> {
    if input.len() > max_len {
        return Err(NewsdeskError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(NewsdeskError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a news source id: lowercase letters, digits and `-`, at most
/// 64 characters (e.g., abc-news-au).
pub fn validate_source_id(input: &str) -> Result<String, NewsdeskError> {
    let trimmed = input.trim();
    if !trimmed.is_empty()
        && trimmed.len() <= MAX_SOURCE_ID_LENGTH
        && trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        Ok(trimmed.to_string())
    } else {
        Err(NewsdeskError::InvalidInput(format!(
            "invalid source id '{}'. Expected lowercase letters, digits and '-' (e.g., abc-news-au)",
            input
        )))
    }
}

/// Validate a bookmark URL: must be an absolute http(s) URL.
pub fn validate_bookmark_url(input: &str) -> Result<String, NewsdeskError> {
    let trimmed = sanitize_text(input, MAX_URL_LENGTH)?;
    match Url::parse(&trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(trimmed),
        _ => Err(NewsdeskError::InvalidInput(format!(
            "invalid bookmark url '{}'. Expected an absolute http(s) URL",
            input
        ))),
    }
}

/// Validate a country code: 2-letter ISO code, normalized to lowercase.
pub fn validate_country(input: &str) -> Result<String, NewsdeskError> {
    let trimmed = input.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_lowercase())
    } else {
        Err(NewsdeskError::InvalidInput(format!(
            "invalid country code '{}'. Expected 2-letter ISO code (e.g., au, us)",
            input
        )))
    }
}

/// Validate a language code: 2-letter ISO 639-1 code, normalized to lowercase.
pub fn validate_language(input: &str) -> Result<String, NewsdeskError> {
    let trimmed = input.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_lowercase())
    } else {
        Err(NewsdeskError::InvalidInput(format!(
            "invalid language code '{}'. Expected 2-letter ISO code (e.g., en, de)",
            input
        )))
    }
}
