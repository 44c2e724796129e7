use serde::{Deserialize, Serialize};

/// Where records that fail normalization end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnclassifiedPolicy {
    /// Collect them into one distinguished unclassifiable group.
    #[default]
    Group,
    /// Return them as a rejected list alongside their errors.
    Report,
}

impl UnclassifiedPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnclassifiedPolicy::Group => "group",
            UnclassifiedPolicy::Report => "report",
        }
    }
}
