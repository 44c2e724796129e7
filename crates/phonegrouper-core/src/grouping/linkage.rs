use std::collections::HashMap;
use std::mem;

use super::route_unclassified;
use crate::domain::group::{Group, GroupKey, Grouping};
use crate::domain::phone::CanonicalNumber;
use crate::error::CoreError;
use crate::rules::{EquivalenceKey, UnclassifiedPolicy};

/// Normalized values of one row by column position; `None` marks an empty column.
pub type ColumnNumbers = Vec<Option<CanonicalNumber>>;

/// Links rows that share an equivalent number in the same column, transitively.
///
/// A row joining several existing groups merges them into the one that appeared first.
/// Groups come out ordered by their earliest row, members in input order.
pub fn link_by_columns<T, I, K>(items: I, rule: &K, policy: UnclassifiedPolicy) -> Grouping<T>
where
    I: IntoIterator<Item = (T, Result<ColumnNumbers, CoreError>)>,
    K: EquivalenceKey + ?Sized,
{
    let mut grouping = Grouping::default();
    let mut sets = DisjointSets::default();
    let mut index: HashMap<(usize, String), usize> = HashMap::new();
    let mut slots: Vec<Option<T>> = Vec::new();

    for (item, normalized) in items {
        let columns = match normalized {
            Ok(columns) => columns,
            Err(err) => {
                route_unclassified(&mut grouping, policy, item, err);
                continue;
            }
        };

        let keys: Vec<(usize, String)> = columns
            .iter()
            .enumerate()
            .filter_map(|(column, number)| number.as_ref().map(|n| (column, rule.key(n))))
            .collect();
        let Some((_, founding_key)) = keys.first() else {
            route_unclassified(&mut grouping, policy, item, CoreError::EmptyRecord);
            continue;
        };

        let mut target: Option<usize> = None;
        for key in &keys {
            if let Some(&set) = index.get(key) {
                let root = sets.find(set);
                target = Some(match target {
                    Some(current) => sets.union(current, root),
                    None => root,
                });
            }
        }
        let target = match target {
            Some(target) => target,
            None => sets.make(founding_key.clone()),
        };

        sets.members[target].push(slots.len());
        slots.push(Some(item));
        for key in keys {
            index.insert(key, target);
        }
    }

    for set in 0..sets.parent.len() {
        if sets.parent[set] != set {
            continue;
        }
        let mut positions = mem::take(&mut sets.members[set]);
        positions.sort_unstable();
        let members: Vec<T> = positions
            .into_iter()
            .filter_map(|position| slots[position].take())
            .collect();
        if members.is_empty() {
            continue;
        }
        grouping.groups.push(Group {
            key: GroupKey::Number(mem::take(&mut sets.keys[set])),
            members,
        });
    }

    grouping
}

/// Union-find over group ids; the lower id (earlier group) always survives a merge.
#[derive(Default)]
struct DisjointSets {
    parent: Vec<usize>,
    members: Vec<Vec<usize>>,
    keys: Vec<String>,
}

impl DisjointSets {
    fn make(&mut self, key: String) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.members.push(Vec::new());
        self.keys.push(key);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    fn union(&mut self, a: usize, b: usize) -> usize {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return a;
        }
        let (keep, absorbed) = if a < b { (a, b) } else { (b, a) };
        self.parent[absorbed] = keep;

        let mut moved = mem::take(&mut self.members[absorbed]);
        if moved.len() > self.members[keep].len() {
            mem::swap(&mut moved, &mut self.members[keep]);
        }
        self.members[keep].extend(moved);
        keep
    }
}
