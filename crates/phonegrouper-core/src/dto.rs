use crate::domain::{Group, Grouping, Member, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: RecordId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDto {
    pub index: usize,
    pub key: String,
    pub size: usize,
    pub members: Vec<MemberDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedDto {
    pub id: RecordId,
    pub text: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingDto {
    pub records: usize,
    pub group_count: usize,
    pub filtered: usize,
    pub groups: Vec<GroupDto>,
    pub unclassifiable: Vec<MemberDto>,
    pub rejected: Vec<RejectedDto>,
}

impl GroupingDto {
    pub fn from_grouping<T: Member>(grouping: &Grouping<T>) -> Self {
        let groups = grouping
            .groups
            .iter()
            .enumerate()
            .map(|(idx, group)| GroupDto::from_group(idx + 1, group))
            .collect();
        let unclassifiable = grouping
            .unclassifiable
            .as_ref()
            .map(|group| group.members.iter().map(MemberDto::from_member).collect())
            .unwrap_or_default();
        let rejected = grouping
            .rejected
            .iter()
            .map(|rejected| RejectedDto {
                id: rejected.item.record_id(),
                text: rejected.item.display_text().into_owned(),
                error: rejected.error.to_string(),
            })
            .collect();

        Self {
            records: grouping.record_count(),
            group_count: grouping.groups.len(),
            filtered: grouping.filtered,
            groups,
            unclassifiable,
            rejected,
        }
    }
}

impl GroupDto {
    fn from_group<T: Member>(index: usize, group: &Group<T>) -> Self {
        Self {
            index,
            key: group.key.to_string(),
            size: group.len(),
            members: group.members.iter().map(MemberDto::from_member).collect(),
        }
    }
}

impl MemberDto {
    fn from_member<T: Member>(member: &T) -> Self {
        Self {
            id: member.record_id(),
            text: member.display_text().into_owned(),
        }
    }
}
