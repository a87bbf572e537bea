//! Category Model
//!
//! The taxonomy is a fixed three-level tree: Root -> Sub -> SubSub. All
//! three levels share one record type carrying a [`CategoryLevel`]
//! discriminant plus level-specific optional fields, so recursive tree
//! operations are written once.

use super::attribute::{Attribute, Filter};
use serde::{Deserialize, Serialize};

/// Tree level discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLevel {
    /// Top level (gender/age segment)
    Root,
    /// Second level
    Sub,
    /// Leaf level
    SubSub,
}

impl CategoryLevel {
    /// The level directly below this one, if any (SubSub is the leaf level)
    pub fn child(&self) -> Option<CategoryLevel> {
        match self {
            CategoryLevel::Root => Some(CategoryLevel::Sub),
            CategoryLevel::Sub => Some(CategoryLevel::SubSub),
            CategoryLevel::SubSub => None,
        }
    }
}

/// Gender/age segment carried by root categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Homme,
    Femme,
    Enfant,
    Neutre,
}

/// Category entity (one shape for all three levels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level: CategoryLevel,
    /// Attribute templates suggested to the operator at product creation
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub products_count: u32,

    // -- Root only --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    // -- Sub and SubSub --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    // -- Sub only --
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_filters: Vec<String>,

    // -- SubSub only --
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,

    /// Children at the next level down (always empty for SubSub)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

/// Create category payload
///
/// The target level is not part of the payload; it is derived from where
/// `parent_id` resolves in the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: String,
    /// None (or the sentinel "none" at the UI boundary) means new root
    pub parent_id: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub gender: Option<Gender>,
    pub attributes: Option<Vec<Attribute>>,
    pub available_filters: Option<Vec<String>>,
    pub filters: Option<Vec<Filter>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_child() {
        assert_eq!(CategoryLevel::Root.child(), Some(CategoryLevel::Sub));
        assert_eq!(CategoryLevel::Sub.child(), Some(CategoryLevel::SubSub));
        assert_eq!(CategoryLevel::SubSub.child(), None);
    }

    #[test]
    fn test_gender_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Homme).unwrap(), "\"homme\"");
        let g: Gender = serde_json::from_str("\"neutre\"").unwrap();
        assert_eq!(g, Gender::Neutre);
    }
}
