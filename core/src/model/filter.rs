use serde::{Deserialize, Serialize};

use crate::model::task::Priority;

/// Field a task listing is ordered by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    Priority,
    /// Any other field name. Leaves the input order untouched.
    #[serde(other)]
    Unrecognized,
}

impl Default for SortField {
    fn default() -> Self {
        SortField::CreatedAt
    }
}

impl From<&str> for SortField {
    fn from(s: &str) -> Self {
        match s {
            "created_at" => SortField::CreatedAt,
            "priority" => SortField::Priority,
            _ => SortField::Unrecognized,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[serde(other)]
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        if s == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// Optional predicates and ordering applied to a task collection.
///
/// Every field is independent; unset fields do not filter. All set filters
/// must match (AND).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub tag: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}
