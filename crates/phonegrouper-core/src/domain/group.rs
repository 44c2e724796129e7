use crate::error::CoreError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Number(String),
    Unclassifiable,
}

impl GroupKey {
    pub fn as_number(&self) -> Option<&str> {
        match self {
            GroupKey::Number(value) => Some(value),
            GroupKey::Unclassifiable => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(value) => f.write_str(value),
            GroupKey::Unclassifiable => f.write_str("unclassifiable"),
        }
    }
}

/// A non-empty run of members sharing one equivalence key, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<T> {
    pub key: GroupKey,
    pub members: Vec<T>,
}

impl<T> Group<T> {
    pub fn new(key: GroupKey, first: T) -> Self {
        Self {
            key,
            members: vec![first],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_unclassifiable(&self) -> bool {
        self.key == GroupKey::Unclassifiable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<T> {
    pub item: T,
    pub error: CoreError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<T> {
    pub groups: Vec<Group<T>>,
    pub unclassifiable: Option<Group<T>>,
    pub rejected: Vec<Rejected<T>>,
    /// Records in classified groups dropped after grouping, e.g. by a minimum size.
    pub filtered: usize,
}

impl<T> Default for Grouping<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            unclassifiable: None,
            rejected: Vec::new(),
            filtered: 0,
        }
    }
}

impl<T> Grouping<T> {
    pub fn classified_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn unclassified_count(&self) -> usize {
        self.unclassifiable.as_ref().map_or(0, Group::len) + self.rejected.len()
    }

    /// Every input record, including those in groups that were filtered out.
    pub fn record_count(&self) -> usize {
        self.classified_count() + self.unclassified_count() + self.filtered
    }
}
