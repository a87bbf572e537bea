//! Category Tree
//!
//! Fixed three-level taxonomy (Root -> Sub -> SubSub). All operations are
//! full-tree walks; depth is bounded at 3 and branching is catalog-scale,
//! so linear search is fine.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Attribute, CategoryCreate, CategoryLevel, CategoryNode, CategoryUpdate};
use shared::util;

/// Flattened tree entry with breadcrumb name (`"Femme > Vêtements"`),
/// used by category selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath {
    pub id: String,
    pub name: String,
}

/// The taxonomy tree. Owns the root nodes; children are nested in-place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTree {
    roots: Vec<CategoryNode>,
}

fn walk<'a>(nodes: &'a [CategoryNode], id: &str) -> Option<&'a CategoryNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = walk(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn walk_mut<'a>(nodes: &'a mut [CategoryNode], id: &str) -> Option<&'a mut CategoryNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = walk_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

fn count_nodes(nodes: &[CategoryNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from externally supplied roots (snapshot import)
    pub fn from_roots(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    /// Total node count across all levels
    pub fn len(&self) -> usize {
        count_nodes(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first lookup, root-to-leaf
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        walk(&self.roots, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Attribute templates of the first matching node that carries any.
    ///
    /// Depth-first, root-to-leaf: a node matching `id` with an empty
    /// template set does not stop the search.
    pub fn list_attributes(&self, id: &str) -> Vec<Attribute> {
        fn search(nodes: &[CategoryNode], id: &str) -> Option<Vec<Attribute>> {
            for node in nodes {
                if node.id == id && !node.attributes.is_empty() {
                    return Some(node.attributes.clone());
                }
                if let Some(found) = search(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.roots, id).unwrap_or_default()
    }

    /// Insert a new node under `parent_id` (None adds a root).
    ///
    /// The level is derived from where the parent resolves: Root parent =>
    /// Sub child, Sub parent => SubSub child. A SubSub parent violates the
    /// depth-3 invariant; an unknown parent is `CategoryNotFound`.
    pub fn insert(&mut self, input: CategoryCreate) -> AppResult<CategoryNode> {
        let node = CategoryNode {
            id: util::prefixed_id("cat"),
            name: input.name,
            description: input.description,
            level: CategoryLevel::Root, // patched below
            attributes: input.attributes,
            products_count: 0,
            gender: None,
            parent_id: None,
            available_filters: Vec::new(),
            filters: Vec::new(),
            children: Vec::new(),
        };

        let parent_id = input.parent_id.filter(|p| p != "none");
        let created = match parent_id {
            None => {
                let mut node = node;
                node.gender = input.gender;
                self.roots.push(node);
                self.roots.last().expect("just pushed")
            }
            Some(parent_id) => {
                let parent = walk_mut(&mut self.roots, &parent_id).ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::CategoryNotFound,
                        format!("Parent category {} not found", parent_id),
                    )
                })?;
                let level = parent.level.child().ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::CategoryLevelInvalid,
                        format!(
                            "Category {} is a leaf; the tree is three levels deep",
                            parent.id
                        ),
                    )
                })?;
                let mut node = node;
                node.level = level;
                node.parent_id = Some(parent.id.clone());
                parent.children.push(node);
                parent.children.last().expect("just pushed")
            }
        };

        tracing::info!(id = %created.id, level = ?created.level, "category created");
        Ok(created.clone())
    }

    /// Patch a node at any level
    pub fn update(&mut self, id: &str, patch: CategoryUpdate) -> AppResult<CategoryNode> {
        let node = walk_mut(&mut self.roots, id).ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {} not found", id))
        })?;

        if let Some(name) = patch.name {
            node.name = name;
        }
        if let Some(description) = patch.description {
            node.description = description;
        }
        // gender is a root-only field; the patch is ignored elsewhere
        if let Some(gender) = patch.gender
            && node.level == CategoryLevel::Root
        {
            node.gender = Some(gender);
        }
        if let Some(attributes) = patch.attributes {
            node.attributes = attributes;
        }
        if let Some(available_filters) = patch.available_filters {
            node.available_filters = available_filters;
        }
        if let Some(filters) = patch.filters {
            node.filters = filters;
        }
        Ok(node.clone())
    }

    /// Remove a node and every descendant in one tree rewrite.
    ///
    /// Returns the number of nodes removed. No partial deletion is
    /// observable: existence is checked before the rewrite.
    pub fn delete(&mut self, id: &str) -> AppResult<usize> {
        let removed = self
            .find(id)
            .map(|n| 1 + count_nodes(&n.children))
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::CategoryNotFound,
                    format!("Category {} not found", id),
                )
            })?;

        fn prune(nodes: &mut Vec<CategoryNode>, id: &str) {
            nodes.retain(|n| n.id != id);
            for node in nodes {
                prune(&mut node.children, id);
            }
        }
        prune(&mut self.roots, id);

        tracing::info!(id = %id, removed, "category deleted");
        Ok(removed)
    }

    /// Adjust the denormalized product counter on a node
    pub fn bump_products_count(&mut self, id: &str, delta: i32) {
        if let Some(node) = walk_mut(&mut self.roots, id) {
            node.products_count = node.products_count.saturating_add_signed(delta);
        }
    }

    /// Flat id + breadcrumb listing for select widgets
    pub fn flatten(&self) -> Vec<CategoryPath> {
        fn collect(nodes: &[CategoryNode], prefix: &str, out: &mut Vec<CategoryPath>) {
            for node in nodes {
                let name = if prefix.is_empty() {
                    node.name.clone()
                } else {
                    format!("{} > {}", prefix, node.name)
                };
                out.push(CategoryPath {
                    id: node.id.clone(),
                    name: name.clone(),
                });
                collect(&node.children, &name, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.roots, "", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Gender, parse_values};

    fn create(name: &str, parent_id: Option<&str>) -> CategoryCreate {
        CategoryCreate {
            name: name.into(),
            description: format!("{} description", name),
            parent_id: parent_id.map(str::to_string),
            gender: Some(Gender::Femme),
            attributes: Vec::new(),
        }
    }

    /// Femme -> Vêtements -> T-Shirts
    fn three_level_tree() -> (CategoryTree, String, String, String) {
        let mut tree = CategoryTree::new();
        let root = tree.insert(create("Femme", None)).unwrap();
        let sub = tree.insert(create("Vêtements", Some(&root.id))).unwrap();
        let leaf = tree.insert(create("T-Shirts", Some(&sub.id))).unwrap();
        (tree, root.id, sub.id, leaf.id)
    }

    #[test]
    fn test_insert_assigns_levels() {
        let (tree, root_id, sub_id, leaf_id) = three_level_tree();
        assert_eq!(tree.find(&root_id).unwrap().level, CategoryLevel::Root);
        assert_eq!(tree.find(&sub_id).unwrap().level, CategoryLevel::Sub);
        assert_eq!(tree.find(&leaf_id).unwrap().level, CategoryLevel::SubSub);
        assert_eq!(tree.find(&sub_id).unwrap().parent_id.as_deref(), Some(root_id.as_str()));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_insert_root_keeps_gender() {
        let mut tree = CategoryTree::new();
        let root = tree.insert(create("Homme", None)).unwrap();
        assert_eq!(root.gender, Some(Gender::Femme));
        // gender is a root-only field; children never carry it
        let sub = tree.insert(create("Chaussures", Some(&root.id))).unwrap();
        assert_eq!(sub.gender, None);
    }

    #[test]
    fn test_insert_under_leaf_violates_depth() {
        let (mut tree, _, _, leaf_id) = three_level_tree();
        let err = tree.insert(create("Too deep", Some(&leaf_id))).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryLevelInvalid);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_insert_unknown_parent() {
        let mut tree = CategoryTree::new();
        let err = tree.insert(create("Orphan", Some("cat-404"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_insert_none_sentinel_adds_root() {
        let mut tree = CategoryTree::new();
        let mut input = create("Enfant", None);
        input.parent_id = Some("none".into());
        let node = tree.insert(input).unwrap();
        assert_eq!(node.level, CategoryLevel::Root);
    }

    #[test]
    fn test_delete_cascades_to_all_descendants() {
        let (mut tree, root_id, sub_id, leaf_id) = three_level_tree();
        let removed = tree.delete(&root_id).unwrap();
        assert_eq!(removed, 3);
        assert!(tree.is_empty());
        assert!(!tree.contains(&sub_id));
        assert!(!tree.contains(&leaf_id));
    }

    #[test]
    fn test_delete_mid_level_keeps_root() {
        let (mut tree, root_id, sub_id, leaf_id) = three_level_tree();
        let removed = tree.delete(&sub_id).unwrap();
        assert_eq!(removed, 2);
        assert!(tree.contains(&root_id));
        assert!(!tree.contains(&leaf_id));
        assert!(tree.find(&root_id).unwrap().children.is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (mut tree, ..) = three_level_tree();
        let err = tree.delete("cat-404").unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_update_patches_fields() {
        let (mut tree, _, sub_id, _) = three_level_tree();
        let updated = tree
            .update(
                &sub_id,
                CategoryUpdate {
                    name: Some("Hauts".into()),
                    available_filters: Some(vec!["Taille".into()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Hauts");
        assert_eq!(updated.available_filters, vec!["Taille"]);
        // untouched fields survive
        assert_eq!(updated.description, "Vêtements description");
    }

    #[test]
    fn test_update_gender_only_applies_to_roots() {
        let (mut tree, root_id, sub_id, _) = three_level_tree();
        let patch = CategoryUpdate {
            gender: Some(Gender::Enfant),
            ..Default::default()
        };
        let root = tree.update(&root_id, patch.clone()).unwrap();
        assert_eq!(root.gender, Some(Gender::Enfant));
        let sub = tree.update(&sub_id, patch).unwrap();
        assert_eq!(sub.gender, None);
    }

    #[test]
    fn test_list_attributes_finds_first_carrier() {
        let (mut tree, _, sub_id, _) = three_level_tree();
        tree.update(
            &sub_id,
            CategoryUpdate {
                attributes: Some(vec![Attribute::new(
                    "cattr-1",
                    "Taille",
                    parse_values("S,M,L"),
                )]),
                ..Default::default()
            },
        )
        .unwrap();

        let attrs = tree.list_attributes(&sub_id);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, "Taille");
        // a node without templates yields nothing
        assert!(tree.list_attributes("cat-404").is_empty());
    }

    #[test]
    fn test_flatten_breadcrumbs() {
        let (tree, root_id, _, _) = three_level_tree();
        let flat = tree.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].id, root_id);
        assert_eq!(flat[0].name, "Femme");
        assert_eq!(flat[1].name, "Femme > Vêtements");
        assert_eq!(flat[2].name, "Femme > Vêtements > T-Shirts");
    }

    #[test]
    fn test_serde_roundtrip_preserves_structure() {
        let (tree, ..) = three_level_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: CategoryTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
