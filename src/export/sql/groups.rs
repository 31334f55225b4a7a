//! `groups` and `entry_group` population rows
//!
//! The group tree is flattened into an adjacency list. Surrogate ids are
//! assigned in pre-order (node first, then each child in listed order) from
//! a caller-supplied start value. The group rows and the membership rows are
//! produced by two separate passes over the same tree; each pass derives its
//! ids from its own [`PreOrder`] walk, so both agree as long as the tree is
//! not modified in between.

use super::literal;
use super::schema::{ENTRIES_TABLE, ENTRY_GROUP_TABLE, GROUPS_TABLE};
use crate::export::ExportError;
use crate::models::GroupNode;
use std::io::Write;
use std::ops::RangeInclusive;

/// Surrogate key of a group row
pub type SurrogateId = u32;

/// Group numbering that cannot be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GroupIdError {
    #[error("Group ids must start at 1 or above")]
    ZeroStart,
    #[error("{count} groups do not fit in the id range starting at {start}")]
    Exhausted { start: SurrogateId, count: usize },
}

/// Ids a pre-order walk from `start_id` assigns to `root` and its descendants
///
/// Fails if `start_id` is zero or the last id would exceed `u32::MAX`.
pub fn id_range(
    root: &GroupNode,
    start_id: SurrogateId,
) -> Result<RangeInclusive<SurrogateId>, GroupIdError> {
    if start_id == 0 {
        return Err(GroupIdError::ZeroStart);
    }
    let count = root.node_count();
    let last = u64::try_from(count - 1)
        .ok()
        .and_then(|offset| u64::from(start_id).checked_add(offset))
        .and_then(|last| SurrogateId::try_from(last).ok())
        .ok_or(GroupIdError::Exhausted {
            start: start_id,
            count,
        })?;
    Ok(start_id..=last)
}

/// A node visited by [`PreOrder`], with its assigned id and its parent's id
#[derive(Debug, Clone, Copy)]
pub struct VisitedGroup<'a> {
    pub node: &'a GroupNode,
    pub id: SurrogateId,
    pub parent_id: SurrogateId,
}

/// Pre-order walk over a group tree assigning consecutive ids
///
/// Uses an explicit stack, so tree depth is bounded only by memory.
/// The root gets `start_id` and `root_parent_id` as its parent.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<(&'a GroupNode, SurrogateId)>,
    ids: RangeInclusive<SurrogateId>,
}

impl<'a> PreOrder<'a> {
    /// Fails unless every node of the tree gets a positive id
    pub fn new(
        root: &'a GroupNode,
        start_id: SurrogateId,
        root_parent_id: SurrogateId,
    ) -> Result<Self, GroupIdError> {
        Ok(Self {
            stack: vec![(root, root_parent_id)],
            ids: id_range(root, start_id)?,
        })
    }

    /// First id not handed out so far, `None` once the id space is used up
    pub fn next_id(&self) -> Option<SurrogateId> {
        if self.ids.is_empty() {
            self.ids.end().checked_add(1)
        } else {
            Some(*self.ids.start())
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = VisitedGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, parent_id) = self.stack.pop()?;
        // sized to the tree in `new`, so it lasts exactly as long as the stack
        let id = self.ids.next()?;
        // reversed so the first child is popped first
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, id)));
        Some(VisitedGroup {
            node,
            id,
            parent_id,
        })
    }
}

/// INSERT statement for one group
pub fn group_row(group: &VisitedGroup<'_>) -> String {
    format!(
        "INSERT INTO {} (groups_id, label, parent_id) VALUES ({}, {}, {});",
        GROUPS_TABLE,
        group.id,
        literal::quote(&group.node.name),
        group.parent_id
    )
}

/// INSERT statement linking one entry to one group
pub fn membership_row(entry_id: &str, group_id: SurrogateId) -> String {
    format!(
        "INSERT INTO {} (entries_id, groups_id) VALUES ((SELECT entries_id FROM {} WHERE jabref_eid={}), (SELECT groups_id FROM {} WHERE groups_id=\"{}\"));",
        ENTRY_GROUP_TABLE,
        ENTRIES_TABLE,
        literal::quote(entry_id),
        GROUPS_TABLE,
        group_id
    )
}

/// Write one `groups` row per node of the tree
///
/// Returns the next unused id, so further subtrees can continue numbering
/// without collisions. It is `None` when the last node took `u32::MAX`.
/// Nothing is written if the tree does not fit in the id range.
pub fn flatten_groups<W: Write>(
    out: &mut W,
    root: &GroupNode,
    start_id: SurrogateId,
    root_parent_id: SurrogateId,
) -> Result<Option<SurrogateId>, ExportError> {
    let mut walk = PreOrder::new(root, start_id, root_parent_id)?;
    for group in walk.by_ref() {
        writeln!(out, "{}", group_row(&group))?;
    }
    Ok(walk.next_id())
}

/// Write one `entry_group` row per member of every explicit group
///
/// Walks the tree independently of [`flatten_groups`] with the same
/// numbering, so `start_id` must match the value used there. Non-explicit
/// groups write nothing but still consume an id. Returns the next unused id,
/// as [`flatten_groups`] does.
pub fn write_memberships<W: Write>(
    out: &mut W,
    root: &GroupNode,
    start_id: SurrogateId,
) -> Result<Option<SurrogateId>, ExportError> {
    // parent ids are not part of membership rows
    let mut walk = PreOrder::new(root, start_id, start_id)?;
    for group in walk.by_ref() {
        let Some(members) = group.node.members() else {
            continue;
        };
        for entry_id in members {
            writeln!(out, "{}", membership_row(entry_id, group.id))?;
        }
    }
    Ok(walk.next_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupKind;

    /// Root -> {A, B}, A -> {C}
    fn tree() -> GroupNode {
        GroupNode::all_entries()
            .with_child(
                GroupNode::explicit("A", ["e1", "e2"])
                    .with_child(GroupNode::explicit("C", ["e3"])),
            )
            .with_child(GroupNode::new(
                "B",
                GroupKind::Keyword {
                    field: "keywords".to_string(),
                    keyword: "rust".to_string(),
                },
            ))
    }

    fn ids(root: &GroupNode, start: SurrogateId) -> Vec<(String, SurrogateId, SurrogateId)> {
        PreOrder::new(root, start, start)
            .unwrap()
            .map(|g| (g.node.name.clone(), g.id, g.parent_id))
            .collect()
    }

    #[test]
    fn test_preorder_ids() {
        assert_eq!(
            ids(&tree(), 1),
            vec![
                ("All Entries".to_string(), 1, 1),
                ("A".to_string(), 2, 1),
                ("C".to_string(), 3, 2),
                ("B".to_string(), 4, 1),
            ]
        );
    }

    #[test]
    fn test_flatten_returns_next_unused_id() {
        let mut out = Vec::new();
        let next = flatten_groups(&mut out, &tree(), 5, 0).unwrap();
        assert_eq!(next, Some(9));
        let sql = String::from_utf8(out).unwrap();
        assert_eq!(sql.lines().count(), 4);
        assert_eq!(
            sql.lines().next().unwrap(),
            r#"INSERT INTO groups (groups_id, label, parent_id) VALUES (5, "All Entries", 0);"#
        );
    }

    #[test]
    fn test_chained_subtrees_do_not_collide() {
        let mut out = Vec::new();
        let next = flatten_groups(&mut out, &tree(), 1, 1).unwrap().unwrap();
        let last = flatten_groups(&mut out, &GroupNode::explicit("Extra", ["x"]), next, 1).unwrap();
        assert_eq!(next, 5);
        assert_eq!(last, Some(6));
        assert!(String::from_utf8(out).unwrap().contains("VALUES (5, \"Extra\", 1);"));
    }

    #[test]
    fn test_memberships_use_flattened_ids() {
        let mut out = Vec::new();
        let next = write_memberships(&mut out, &tree(), 1).unwrap();
        assert_eq!(next, Some(5));
        let sql = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = sql.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], membership_row("e1", 2));
        assert_eq!(rows[1], membership_row("e2", 2));
        assert_eq!(rows[2], membership_row("e3", 3));
    }

    #[test]
    fn test_membership_row_text() {
        assert_eq!(
            membership_row("0000007", 3),
            "INSERT INTO entry_group (entries_id, groups_id) VALUES \
             ((SELECT entries_id FROM entries WHERE jabref_eid=\"0000007\"), \
             (SELECT groups_id FROM groups WHERE groups_id=\"3\"));"
        );
    }

    #[test]
    fn test_single_node_tree() {
        let root = GroupNode::all_entries();
        let mut out = Vec::new();
        assert_eq!(flatten_groups(&mut out, &root, 1, 1).unwrap(), Some(2));
        let mut out = Vec::new();
        assert_eq!(write_memberships(&mut out, &root, 1).unwrap(), Some(2));
        assert!(out.is_empty());
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut node = GroupNode::explicit("leaf", ["deep"]);
        for depth in 0..200_000 {
            node = GroupNode::new(format!("level{}", depth), GroupKind::AllEntries).with_child(node);
        }
        let mut out = Vec::new();
        let next = write_memberships(&mut out, &node, 1).unwrap();
        assert_eq!(next, Some(200_002));
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            membership_row("deep", 200_001)
        );
        drop(node);
    }

    #[test]
    fn test_zero_start_id_is_rejected() {
        assert_eq!(id_range(&tree(), 0), Err(GroupIdError::ZeroStart));
        assert!(PreOrder::new(&tree(), 0, 0).is_err());

        let mut out = Vec::new();
        let err = flatten_groups(&mut out, &tree(), 0, 0).unwrap_err();
        assert!(matches!(err, ExportError::GroupIds(GroupIdError::ZeroStart)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_ids_up_to_the_last_value() {
        let root = GroupNode::all_entries().with_child(GroupNode::explicit("A", ["e1"]));
        let start = SurrogateId::MAX - 1;
        assert_eq!(id_range(&root, start), Ok(start..=SurrogateId::MAX));

        let mut out = Vec::new();
        assert_eq!(flatten_groups(&mut out, &root, start, start).unwrap(), None);
        let sql = String::from_utf8(out).unwrap();
        assert!(sql.contains(&format!("VALUES ({}, \"A\", {});", SurrogateId::MAX, start)));

        let mut out = Vec::new();
        assert_eq!(write_memberships(&mut out, &root, start).unwrap(), None);
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            membership_row("e1", SurrogateId::MAX)
        );
    }

    #[test]
    fn test_id_range_exhausted() {
        let root = GroupNode::all_entries().with_child(GroupNode::explicit("A", ["e1"]));
        assert_eq!(
            id_range(&root, SurrogateId::MAX),
            Err(GroupIdError::Exhausted {
                start: SurrogateId::MAX,
                count: 2
            })
        );

        let mut out = Vec::new();
        let err = write_memberships(&mut out, &root, SurrogateId::MAX).unwrap_err();
        assert!(matches!(
            err,
            ExportError::GroupIds(GroupIdError::Exhausted { count: 2, .. })
        ));
        assert!(out.is_empty());
    }
}
