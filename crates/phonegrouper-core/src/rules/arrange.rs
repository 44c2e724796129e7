use crate::domain::group::Grouping;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_GROUP_SIZE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    #[default]
    FirstSeen,
    SizeDesc,
}

pub fn validate_min_group_size(value: i64) -> Result<usize, CoreError> {
    match usize::try_from(value) {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(CoreError::InvalidMinGroupSize(value)),
    }
}

/// Drops classified groups smaller than `min_size` and reorders the rest.
/// The unclassifiable group and the rejected list are left alone.
pub fn arrange<T>(grouping: &mut Grouping<T>, order: GroupOrder, min_size: usize) {
    let mut filtered = 0;
    grouping.groups.retain(|group| {
        let keep = group.len() >= min_size;
        if !keep {
            filtered += group.len();
        }
        keep
    });
    grouping.filtered += filtered;
    if order == GroupOrder::SizeDesc {
        // Stable: equal sizes keep first-seen order.
        grouping.groups.sort_by(|a, b| b.len().cmp(&a.len()));
    }
}
