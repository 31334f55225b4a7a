//! Group tree model for the SDK

use serde::{Deserialize, Serialize};

/// Group variant
///
/// Only [`GroupKind::Explicit`] enumerates its members. The other variants
/// select entries by rule or exist for organisation and never produce
/// membership rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupKind {
    /// Root group holding every entry
    #[default]
    AllEntries,
    /// Explicit list of entry ids
    Explicit {
        #[serde(default)]
        members: Vec<String>,
    },
    /// Entries whose `field` contains `keyword`
    Keyword { field: String, keyword: String },
    /// Entries matching a free-text search expression
    Search { expression: String },
}

/// A node of the group tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupNode {
    pub name: String,
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    pub fn new(name: impl Into<String>, kind: GroupKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Root group of a library ("All Entries")
    pub fn all_entries() -> Self {
        Self::new("All Entries", GroupKind::AllEntries)
    }

    /// Explicit group with the given member entry ids
    pub fn explicit<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            GroupKind::Explicit {
                members: members.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn with_child(mut self, child: GroupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Member ids if this is an explicit group
    pub fn members(&self) -> Option<&[String]> {
        match &self.kind {
            GroupKind::Explicit { members } => Some(members),
            _ => None,
        }
    }

    /// Pre-order walk over this subtree, `self` first
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

// Children are unlinked iteratively so deep trees drop without recursion.
impl Drop for GroupNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator returned by [`GroupNode::iter`]
#[derive(Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a GroupNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a GroupNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
