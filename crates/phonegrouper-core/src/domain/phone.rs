use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COUNTRY_CODE: &str = "1";
pub const DEFAULT_MINIMUM_DIGIT_COUNT: usize = 7;
/// E.164 caps a full number at 15 digits.
pub const MAX_MINIMUM_DIGIT_COUNT: usize = 15;
const MAX_COUNTRY_CODE_LEN: usize = 3;
const INTERNATIONAL_PREFIX: &str = "00";

/// Digits-only, comparison-ready form of a phone number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalNumber(String);

impl CanonicalNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digit_count(&self) -> usize {
        self.0.len()
    }

    /// The last `digits` digits, or the whole number when it is shorter.
    pub fn suffix(&self, digits: usize) -> &str {
        let len = self.0.len();
        &self.0[len.saturating_sub(digits)..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub strip_leading_zero: bool,
    pub default_country_code: Option<String>,
    pub minimum_digit_count: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_leading_zero: false,
            default_country_code: Some(DEFAULT_COUNTRY_CODE.to_string()),
            minimum_digit_count: DEFAULT_MINIMUM_DIGIT_COUNT,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(code) = &self.default_country_code {
            // Matched against bare digits, so `+44` or ` 44` would never strip.
            if validate_country_code(code)? != *code {
                return Err(CoreError::InvalidCountryCode(code.clone()));
            }
        }
        if self.minimum_digit_count > MAX_MINIMUM_DIGIT_COUNT {
            return Err(CoreError::InvalidMinimumDigitCount(
                i64::try_from(self.minimum_digit_count).unwrap_or(i64::MAX),
            ));
        }
        Ok(())
    }

    pub fn normalize(&self, raw: &str) -> Result<CanonicalNumber, CoreError> {
        normalize_phone(raw, self)
    }
}

pub fn validate_minimum_digit_count(value: i64) -> Result<usize, CoreError> {
    match usize::try_from(value) {
        Ok(count) if count <= MAX_MINIMUM_DIGIT_COUNT => Ok(count),
        _ => Err(CoreError::InvalidMinimumDigitCount(value)),
    }
}

pub fn validate_country_code(value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim().trim_start_matches('+');
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_COUNTRY_CODE_LEN
        && trimmed.chars().all(|ch| ch.is_ascii_digit())
        && !trimmed.starts_with('0');
    if !valid {
        return Err(CoreError::InvalidCountryCode(value.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn normalize_phone(raw: &str, config: &NormalizerConfig) -> Result<CanonicalNumber, CoreError> {
    let trimmed = raw.trim();
    let mut digits = String::with_capacity(trimmed.len());
    let mut plus = false;

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if ch == '+' && digits.is_empty() {
            plus = true;
            continue;
        }
        // Extension or dial-pause markers end the number.
        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            break;
        }
    }

    let (international, rest) = if plus {
        (true, digits.as_str())
    } else if let Some(rest) = digits.strip_prefix(INTERNATIONAL_PREFIX) {
        (true, rest)
    } else {
        (false, digits.as_str())
    };

    let canonical = if international {
        let rest = rest.trim_start_matches('0');
        let national = config
            .default_country_code
            .as_deref()
            .and_then(|code| rest.strip_prefix(code));
        // A trunk zero is never dialled after the country code.
        match national {
            Some(national) => national.trim_start_matches('0'),
            None => rest,
        }
    } else if config.strip_leading_zero {
        rest.trim_start_matches('0')
    } else {
        rest
    };

    if canonical.len() < config.minimum_digit_count.max(1) {
        return Err(CoreError::InvalidNumberFormat {
            digits: canonical.len(),
            minimum: config.minimum_digit_count.max(1),
        });
    }

    Ok(CanonicalNumber(canonical.to_string()))
}
