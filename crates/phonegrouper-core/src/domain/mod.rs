pub mod group;
pub mod ids;
pub mod phone;
pub mod record;

pub use group::{Group, GroupKey, Grouping, Rejected};
pub use ids::RecordId;
pub use phone::{
    normalize_phone, validate_country_code, validate_minimum_digit_count, CanonicalNumber,
    NormalizerConfig, DEFAULT_COUNTRY_CODE, DEFAULT_MINIMUM_DIGIT_COUNT, MAX_MINIMUM_DIGIT_COUNT,
};
pub use record::{Member, Record, Row};
