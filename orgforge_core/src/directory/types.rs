//! Data types for the directory-service view

use serde::{Deserialize, Serialize};

/// An account as reported by the directory backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A node in the organizational hierarchy
///
/// This is a read-through cached view; the directory backend owns the node.
/// Names are NOT unique across the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuNode {
    pub id: String,
    pub name: String,
    /// `None` for organization roots
    pub parent_id: Option<String>,
}

impl OuNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Kind of a parent node returned by the parent listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentKind {
    Root,
    OrganizationalUnit,
}

/// A parent reference for an account or OU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: String,
    pub kind: ParentKind,
}

/// One page of a paginated backend listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the next page, `None` when the listing is exhausted
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a final page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Create a page continued by `cursor`
    pub fn with_cursor(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ou_node_builder() {
        let node = OuNode::new("ou-1234", "Sandbox").with_parent("r-root");

        assert_eq!(node.id, "ou-1234");
        assert_eq!(node.name, "Sandbox");
        assert_eq!(node.parent_id.as_deref(), Some("r-root"));
    }

    #[test]
    fn test_page_constructors() {
        let done: Page<u32> = Page::last(vec![1, 2]);
        assert!(done.next_cursor.is_none());

        let more = Page::with_cursor(vec![3], "cursor-1");
        assert_eq!(more.next_cursor.as_deref(), Some("cursor-1"));
    }

    #[test]
    fn test_parent_kind_serde() {
        let json = serde_json::to_string(&ParentKind::OrganizationalUnit).unwrap();
        assert_eq!(json, "\"ORGANIZATIONAL_UNIT\"");
    }
}
