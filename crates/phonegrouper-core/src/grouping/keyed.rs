use std::collections::HashMap;

use super::route_unclassified;
use crate::domain::group::{Group, GroupKey, Grouping};
use crate::domain::phone::CanonicalNumber;
use crate::error::CoreError;
use crate::rules::{EquivalenceKey, UnclassifiedPolicy};

/// Partitions normalized items in a single pass.
///
/// Groups come out in order of first appearance of their key, and members keep input order.
/// Items whose normalization failed are routed per `policy`; they never abort the pass.
pub fn group_by_key<T, I, K>(items: I, rule: &K, policy: UnclassifiedPolicy) -> Grouping<T>
where
    I: IntoIterator<Item = (T, Result<CanonicalNumber, CoreError>)>,
    K: EquivalenceKey + ?Sized,
{
    let mut grouping = Grouping::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (item, normalized) in items {
        let number = match normalized {
            Ok(number) => number,
            Err(err) => {
                route_unclassified(&mut grouping, policy, item, err);
                continue;
            }
        };

        let key = rule.key(&number);
        match index.get(&key) {
            Some(&slot) => grouping.groups[slot].members.push(item),
            None => {
                index.insert(key.clone(), grouping.groups.len());
                grouping.groups.push(Group::new(GroupKey::Number(key), item));
            }
        }
    }

    grouping
}
