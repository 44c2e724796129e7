mod keyed;
mod linkage;

pub use keyed::group_by_key;
pub use linkage::{link_by_columns, ColumnNumbers};

use crate::domain::group::{Group, GroupKey, Grouping, Rejected};
use crate::error::CoreError;
use crate::rules::UnclassifiedPolicy;

fn route_unclassified<T>(
    grouping: &mut Grouping<T>,
    policy: UnclassifiedPolicy,
    item: T,
    error: CoreError,
) {
    match policy {
        UnclassifiedPolicy::Group => match grouping.unclassifiable.as_mut() {
            Some(group) => group.members.push(item),
            None => grouping.unclassifiable = Some(Group::new(GroupKey::Unclassifiable, item)),
        },
        UnclassifiedPolicy::Report => grouping.rejected.push(Rejected { item, error }),
    }
}
