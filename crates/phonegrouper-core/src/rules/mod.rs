pub mod arrange;
pub mod equivalence;
pub mod policy;

pub use arrange::{arrange, validate_min_group_size, GroupOrder, DEFAULT_MIN_GROUP_SIZE};
pub use equivalence::{
    validate_suffix_digits, EquivalenceKey, EquivalenceRule, DEFAULT_SUFFIX_DIGITS,
};
pub use policy::UnclassifiedPolicy;
