//! Ordering of rocket listings

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field a rocket listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Type,
    Speed,
    Mission,
    Status,
}

impl SortField {
    /// Lenient parse: unknown or missing values fall back to `type`
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("speed") => Self::Speed,
            Some("mission") => Self::Mission,
            Some("status") => Self::Status,
            _ => Self::Type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive `desc` selects descending, anything else ascending
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RocketSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl RocketSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        Self {
            field: SortField::parse_lenient(sort_by),
            order: SortOrder::parse_lenient(sort_order),
        }
    }
}
