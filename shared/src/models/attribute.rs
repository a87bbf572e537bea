//! Attribute Model

use serde::{Deserialize, Serialize};

/// Attribute template: named closed enumeration of allowed values.
///
/// Attached to a category (template suggested to the operator) or to a
/// product (independently editable copy). Value order is significant: it is
/// the declaration order used for variant name/SKU derivation.
///
/// Name uniqueness within one owner is expected but deliberately not
/// enforced; duplicate adds are last-write-wins at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new(id: impl Into<String>, name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            values,
        }
    }
}

/// Filter attached to a leaf (sub-sub) category, used by the storefront
/// sidebar. Same shape as an attribute but a distinct concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

/// Split a comma-delimited value string into an ordered value list.
///
/// Values are trimmed and empties filtered out, so `"S, M, ,L"` yields
/// `["S", "M", "L"]`.
pub fn parse_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
