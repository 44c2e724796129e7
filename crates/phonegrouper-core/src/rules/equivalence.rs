use crate::domain::phone::{CanonicalNumber, MAX_MINIMUM_DIGIT_COUNT};
use crate::error::CoreError;

/// Local subscriber numbers in most numbering plans fit in seven digits.
pub const DEFAULT_SUFFIX_DIGITS: usize = 7;

/// Derives the grouping key for a canonical number. Numbers with equal keys share a group.
pub trait EquivalenceKey {
    fn key(&self, number: &CanonicalNumber) -> String;
}

impl<F> EquivalenceKey for F
where
    F: Fn(&CanonicalNumber) -> String,
{
    fn key(&self, number: &CanonicalNumber) -> String {
        self(number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquivalenceRule {
    #[default]
    Exact,
    Suffix(usize),
}

impl EquivalenceRule {
    pub fn suffix(digits: i64) -> Result<Self, CoreError> {
        Ok(EquivalenceRule::Suffix(validate_suffix_digits(digits)?))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match *self {
            EquivalenceRule::Exact => Ok(()),
            EquivalenceRule::Suffix(digits) => {
                let as_i64 = i64::try_from(digits).unwrap_or(i64::MAX);
                validate_suffix_digits(as_i64).map(|_| ())
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            EquivalenceRule::Exact => "exact",
            EquivalenceRule::Suffix(_) => "suffix",
        }
    }
}

impl EquivalenceKey for EquivalenceRule {
    fn key(&self, number: &CanonicalNumber) -> String {
        match *self {
            EquivalenceRule::Exact => number.as_str().to_string(),
            EquivalenceRule::Suffix(digits) => number.suffix(digits).to_string(),
        }
    }
}

pub fn validate_suffix_digits(value: i64) -> Result<usize, CoreError> {
    match usize::try_from(value) {
        Ok(digits) if (1..=MAX_MINIMUM_DIGIT_COUNT).contains(&digits) => Ok(digits),
        _ => Err(CoreError::InvalidSuffixDigits(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_suffix_digits, EquivalenceKey, EquivalenceRule};
    use crate::domain::phone::{normalize_phone, CanonicalNumber, NormalizerConfig};

    fn canonical(raw: &str) -> CanonicalNumber {
        normalize_phone(raw, &NormalizerConfig::default()).expect("normalize")
    }

    #[test]
    fn exact_rule_uses_whole_number() {
        let key = EquivalenceRule::Exact.key(&canonical("555-123-4567"));
        assert_eq!(key, "5551234567");
    }

    #[test]
    fn suffix_rule_ignores_prefixes() {
        let rule = EquivalenceRule::suffix(7).unwrap();
        let local = rule.key(&canonical("123-4567"));
        let long = rule.key(&canonical("+44 555 123 4567"));
        assert_eq!(local, long);
    }

    #[test]
    fn closures_act_as_rules() {
        let area_code = |number: &CanonicalNumber| number.as_str()[..3].to_string();
        assert_eq!(area_code.key(&canonical("(415) 555-1212")), "415");
    }

    #[test]
    fn suffix_digits_must_be_positive() {
        assert!(validate_suffix_digits(0).is_err());
        assert!(validate_suffix_digits(-3).is_err());
        assert!(validate_suffix_digits(16).is_err());
        assert_eq!(validate_suffix_digits(4).unwrap(), 4);
        assert!(EquivalenceRule::Suffix(0).validate().is_err());
    }
}
