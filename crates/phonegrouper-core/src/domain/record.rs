use crate::domain::ids::RecordId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Anything the grouper can place in a group and a report can print.
pub trait Member {
    fn record_id(&self) -> RecordId;
    fn display_text(&self) -> Cow<'_, str>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub raw: String,
    pub name: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

impl Member for Record {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn display_text(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Owned(format!("{}\t{}", self.raw, name)),
            None => Cow::Borrowed(&self.raw),
        }
    }
}

/// A multi-column record: one phone number (or nothing) per column position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RecordId,
    pub line: String,
    pub values: Vec<String>,
}

impl Row {
    pub fn new(id: impl Into<RecordId>, line: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            id: id.into(),
            line: line.into(),
            values,
        }
    }

    pub fn non_empty_values(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values
            .iter()
            .enumerate()
            .map(|(column, value)| (column, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }
}

impl Member for Row {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn display_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.line)
    }
}
