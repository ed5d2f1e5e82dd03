// ============================================================================
// HRIS Core - Object Hierarchy
// File: crates/hris-core/src/hierarchy.rs
// Description: Flat object list to tree, sibling ordering, cycle checks
// ============================================================================
//! Pure tree bookkeeping over the flat `AppObject` store. Everything here
//! operates on in-memory slices so ordering and cycle rules can be tested
//! without a database.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{AppObject, ObjectStatus};
use hris_shared::constants::FIRST_SORT_ORDER;

/// A node of the materialized object tree.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectNode {
    pub id: Uuid,
    pub name: String,
    pub access_name: String,
    pub route: Option<String>,
    pub component_ref: Option<String>,
    pub is_menu: bool,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub status: ObjectStatus,
    pub children: Vec<ObjectNode>,
}

impl ObjectNode {
    fn from_object(object: &AppObject) -> Self {
        Self {
            id: object.id,
            name: object.name.clone(),
            access_name: object.access_name.clone(),
            route: object.route.clone(),
            component_ref: object.component_ref.clone(),
            is_menu: object.is_menu,
            icon: object.icon.clone(),
            parent_id: object.parent_id,
            sort_order: object.sort_order,
            status: object.status,
            children: Vec::new(),
        }
    }
}

/// Sibling ordering: explicit order first, then name, then id so the
/// sequence is total even when stored orders collide.
fn sibling_cmp(a: &AppObject, b: &AppObject) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Convert the flat object list into a forest ordered by (parent, order).
///
/// A node whose parent id does not resolve within `objects` is treated as a
/// root. Each node is emitted at most once; members of a corrupt parent
/// cycle are unreachable from any root and are dropped rather than looped
/// over.
pub fn build_tree(objects: &[AppObject]) -> Vec<ObjectNode> {
    let ids: HashSet<Uuid> = objects.iter().map(|o| o.id).collect();

    let mut groups: HashMap<Option<Uuid>, Vec<&AppObject>> = HashMap::new();
    for object in objects {
        let key = match object.parent_id {
            Some(parent) if ids.contains(&parent) && parent != object.id => Some(parent),
            _ => None,
        };
        groups.entry(key).or_default().push(object);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| sibling_cmp(a, b));
    }

    let mut visited = HashSet::new();
    attach(None, &groups, &mut visited)
}

fn attach(
    parent: Option<Uuid>,
    groups: &HashMap<Option<Uuid>, Vec<&AppObject>>,
    visited: &mut HashSet<Uuid>,
) -> Vec<ObjectNode> {
    let Some(group) = groups.get(&parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(group.len());
    for object in group {
        if !visited.insert(object.id) {
            continue;
        }
        let mut node = ObjectNode::from_object(object);
        node.children = attach(Some(object.id), groups, visited);
        nodes.push(node);
    }
    nodes
}

/// Check whether assigning `new_parent_id` to `object_id` would make the
/// object its own ancestor. Walks the prospective parent chain upward,
/// guarded against pre-existing cycles in stored data.
pub fn would_create_cycle(
    objects: &[AppObject],
    object_id: Uuid,
    new_parent_id: Option<Uuid>,
) -> bool {
    let Some(start) = new_parent_id else {
        return false;
    };
    if start == object_id {
        return true;
    }

    let parents: HashMap<Uuid, Option<Uuid>> =
        objects.iter().map(|o| (o.id, o.parent_id)).collect();

    let mut seen = HashSet::new();
    let mut current = Some(start);
    while let Some(id) = current {
        if id == object_id {
            return true;
        }
        if !seen.insert(id) {
            // Walked into an existing cycle that does not involve the object.
            return false;
        }
        current = parents.get(&id).copied().flatten();
    }
    false
}

/// Next append position for a sibling group.
pub fn next_sort_order(siblings: &[AppObject]) -> i32 {
    siblings
        .iter()
        .map(|o| o.sort_order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(FIRST_SORT_ORDER)
}

/// Re-derive the contiguous 1..=n sequence for one sibling group, keeping
/// the current relative order. Returns only the assignments that changed.
pub fn renumber(siblings: &[AppObject]) -> Vec<(Uuid, i32)> {
    let mut ordered: Vec<&AppObject> = siblings.iter().collect();
    ordered.sort_by(|a, b| sibling_cmp(a, b));

    ordered
        .iter()
        .enumerate()
        .filter_map(|(index, object)| {
            let order = FIRST_SORT_ORDER + index as i32;
            (object.sort_order != order).then_some((object.id, order))
        })
        .collect()
}

/// Sequence a group with `inserted` placed at `position` (0-based, clamped
/// to the group size). `siblings` must not already contain the inserted
/// object. Returns the full assignment set for the group.
pub fn sequence_with_insert(
    siblings: &[AppObject],
    inserted_id: Uuid,
    position: usize,
) -> Vec<(Uuid, i32)> {
    let mut ordered: Vec<Uuid> = {
        let mut group: Vec<&AppObject> = siblings.iter().collect();
        group.sort_by(|a, b| sibling_cmp(a, b));
        group.iter().map(|o| o.id).collect()
    };

    let position = position.min(ordered.len());
    ordered.insert(position, inserted_id);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, id)| (id, FIRST_SORT_ORDER + index as i32))
        .collect()
}

/// Ids of every ancestor of `id`, nearest first, cycle-guarded.
pub fn ancestors_of(objects: &[AppObject], id: Uuid) -> Vec<Uuid> {
    let parents: HashMap<Uuid, Option<Uuid>> =
        objects.iter().map(|o| (o.id, o.parent_id)).collect();

    let mut ancestors = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(id);

    let mut current = parents.get(&id).copied().flatten();
    while let Some(parent) = current {
        if !seen.insert(parent) {
            break;
        }
        ancestors.push(parent);
        current = parents.get(&parent).copied().flatten();
    }
    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, parent_id: Option<Uuid>, sort_order: i32) -> AppObject {
        AppObject::new(
            name.to_string(),
            name.to_lowercase().replace(' ', "_"),
            None,
            None,
            true,
            None,
            parent_id,
            sort_order,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_build_tree_orders_siblings() {
        let root = object("Settings", None, 1);
        let second = object("Roles", Some(root.id), 2);
        let first = object("Objects", Some(root.id), 1);

        let tree = build_tree(&[second.clone(), root.clone(), first.clone()]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, root.id);
        let children: Vec<Uuid> = tree[0].children.iter().map(|n| n.id).collect();
        assert_eq!(children, vec![first.id, second.id]);
    }

    #[test]
    fn test_build_tree_tie_break_by_name() {
        let a = object("Attendance", None, 1);
        let b = object("Benefits", None, 1);
        let tree = build_tree(&[b.clone(), a.clone()]);
        assert_eq!(tree[0].id, a.id);
        assert_eq!(tree[1].id, b.id);
    }

    #[test]
    fn test_unresolved_parent_becomes_root() {
        let orphan = object("Orphan", Some(Uuid::new_v4()), 3);
        let tree = build_tree(&[orphan.clone()]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, orphan.id);
    }

    #[test]
    fn test_self_parent_becomes_root() {
        let mut node = object("Loop", None, 1);
        node.parent_id = Some(node.id);
        let tree = build_tree(&[node.clone()]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_stored_cycle_does_not_hang() {
        let mut a = object("First", None, 1);
        let mut b = object("Second", None, 2);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let root = object("Root", None, 1);

        let tree = build_tree(&[a, b, root.clone()]);
        // Cycle members are unreachable; only the clean root remains.
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, root.id);
    }

    #[test]
    fn test_would_create_cycle_self() {
        let node = object("Node", None, 1);
        assert!(would_create_cycle(&[node.clone()], node.id, Some(node.id)));
    }

    #[test]
    fn test_would_create_cycle_deep_chain() {
        let top = object("Top", None, 1);
        let mid = object("Mid", Some(top.id), 1);
        let leaf = object("Leaf", Some(mid.id), 1);
        let objects = [top.clone(), mid.clone(), leaf.clone()];

        // Moving the top under its grandchild closes a loop.
        assert!(would_create_cycle(&objects, top.id, Some(leaf.id)));
        // Moving the leaf under the top is a plain reparent.
        assert!(!would_create_cycle(&objects, leaf.id, Some(top.id)));
        // Detaching to root never cycles.
        assert!(!would_create_cycle(&objects, top.id, None));
    }

    #[test]
    fn test_would_create_cycle_survives_corrupt_chain() {
        let mut a = object("First", None, 1);
        let mut b = object("Second", None, 2);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let other = object("Other", None, 1);

        // The corrupt loop is unrelated to `other`; the walk terminates.
        assert!(!would_create_cycle(
            &[a.clone(), b.clone(), other.clone()],
            other.id,
            Some(a.id)
        ));
    }

    #[test]
    fn test_next_sort_order() {
        assert_eq!(next_sort_order(&[]), 1);
        let group = [object("A1", None, 1), object("A2", None, 5)];
        assert_eq!(next_sort_order(&group), 6);
    }

    #[test]
    fn test_renumber_compacts_gaps() {
        let a = object("Alpha", None, 2);
        let b = object("Beta", None, 5);
        let c = object("Gamma", None, 9);

        let changes = renumber(&[c.clone(), a.clone(), b.clone()]);
        let map: std::collections::HashMap<Uuid, i32> = changes.into_iter().collect();
        assert_eq!(map.get(&a.id), Some(&1));
        assert_eq!(map.get(&b.id), Some(&2));
        assert_eq!(map.get(&c.id), Some(&3));
    }

    #[test]
    fn test_renumber_reports_only_changes() {
        let a = object("Alpha", None, 1);
        let b = object("Beta", None, 3);

        let changes = renumber(&[a.clone(), b.clone()]);
        assert_eq!(changes, vec![(b.id, 2)]);
    }

    #[test]
    fn test_sequence_with_insert_clamps_position() {
        let a = object("Alpha", None, 1);
        let b = object("Beta", None, 2);
        let moved = Uuid::new_v4();

        let assignments = sequence_with_insert(&[a.clone(), b.clone()], moved, 99);
        let map: std::collections::HashMap<Uuid, i32> = assignments.into_iter().collect();
        assert_eq!(map.get(&a.id), Some(&1));
        assert_eq!(map.get(&b.id), Some(&2));
        assert_eq!(map.get(&moved), Some(&3));
    }

    #[test]
    fn test_sequence_with_insert_front() {
        let a = object("Alpha", None, 1);
        let b = object("Beta", None, 2);
        let moved = Uuid::new_v4();

        let assignments = sequence_with_insert(&[a.clone(), b.clone()], moved, 0);
        let map: std::collections::HashMap<Uuid, i32> = assignments.into_iter().collect();
        assert_eq!(map.get(&moved), Some(&1));
        assert_eq!(map.get(&a.id), Some(&2));
        assert_eq!(map.get(&b.id), Some(&3));
    }

    #[test]
    fn test_ancestors_of() {
        let top = object("Top", None, 1);
        let mid = object("Mid", Some(top.id), 1);
        let leaf = object("Leaf", Some(mid.id), 1);
        let objects = [top.clone(), mid.clone(), leaf.clone()];

        assert_eq!(ancestors_of(&objects, leaf.id), vec![mid.id, top.id]);
        assert!(ancestors_of(&objects, top.id).is_empty());
    }
}
