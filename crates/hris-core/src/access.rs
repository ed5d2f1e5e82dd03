// ============================================================================
// HRIS Core - Access Resolution
// File: crates/hris-core/src/access.rs
// Description: Role grants to navigation tree, route table, and access maps
// ============================================================================
//! Resolves a role's granted object-id set into everything the admin
//! console needs: which nodes are visible (a grant on a child makes every
//! ancestor visible), the navigation tree of menu nodes, the flat route
//! table, and lookup maps keyed by object id and by component name.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::AppObject;
use crate::hierarchy::{self, ObjectNode};

/// One row of the client route table.
#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub object_id: Uuid,
    pub access_name: String,
    pub route: String,
    pub component_ref: String,
}

/// Everything derived from one role's grants. Rebuilt whenever role access
/// or the object list changes; consumers treat it as immutable.
#[derive(Debug, Clone, Serialize)]
pub struct AccessSnapshot {
    pub role_id: Uuid,
    /// Navigation forest of visible menu nodes.
    pub menu: Vec<ObjectNode>,
    /// Flat table of visible nodes that carry both route and component.
    pub routes: Vec<RouteEntry>,
    /// Visible object ids, grants plus implied ancestors.
    pub object_ids: HashSet<Uuid>,
    /// Visible object id per component name.
    pub by_component: HashMap<String, Uuid>,
    pub built_at: DateTime<Utc>,
}

impl AccessSnapshot {
    pub fn allows_object(&self, object_id: Uuid) -> bool {
        self.object_ids.contains(&object_id)
    }

    pub fn allows_component(&self, component_ref: &str) -> bool {
        self.by_component.contains_key(component_ref)
    }
}

/// Resolve a grant set against the current object list.
///
/// Grants pointing at unknown or inactive objects are ignored. Visibility
/// propagates from child to ancestor so a granted action keeps its parent
/// menu chain reachable.
pub fn resolve(role_id: Uuid, objects: &[AppObject], granted: &HashSet<Uuid>) -> AccessSnapshot {
    let active: Vec<AppObject> = objects.iter().filter(|o| o.is_active()).cloned().collect();
    let active_ids: HashSet<Uuid> = active.iter().map(|o| o.id).collect();

    let mut visible: HashSet<Uuid> = HashSet::new();
    for id in granted {
        if !active_ids.contains(id) {
            continue;
        }
        visible.insert(*id);
        for ancestor in hierarchy::ancestors_of(&active, *id) {
            if active_ids.contains(&ancestor) {
                visible.insert(ancestor);
            }
        }
    }

    let visible_objects: Vec<AppObject> = active
        .iter()
        .filter(|o| visible.contains(&o.id))
        .cloned()
        .collect();

    let menu_objects: Vec<AppObject> = visible_objects
        .iter()
        .filter(|o| o.is_menu)
        .cloned()
        .collect();
    let menu = hierarchy::build_tree(&menu_objects);

    let mut routes: Vec<RouteEntry> = visible_objects
        .iter()
        .filter_map(|o| {
            let route = o.route.clone()?;
            let component_ref = o.component_ref.clone()?;
            Some(RouteEntry {
                object_id: o.id,
                access_name: o.access_name.clone(),
                route,
                component_ref,
            })
        })
        .collect();
    routes.sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.object_id.cmp(&b.object_id)));

    let by_component: HashMap<String, Uuid> = visible_objects
        .iter()
        .filter_map(|o| o.component_ref.clone().map(|c| (c, o.id)))
        .collect();

    AccessSnapshot {
        role_id,
        menu,
        routes,
        object_ids: visible,
        by_component,
        built_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObjectStatus;

    fn object(
        name: &str,
        parent_id: Option<Uuid>,
        sort_order: i32,
        is_menu: bool,
        routable: bool,
    ) -> AppObject {
        let access = name.to_lowercase().replace(' ', "_");
        AppObject::new(
            name.to_string(),
            access.clone(),
            routable.then(|| format!("/{}", access)),
            routable.then(|| format!("{}Page", name.replace(' ', ""))),
            is_menu,
            None,
            parent_id,
            sort_order,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_grant_on_child_reveals_ancestors() {
        let top = object("Master Data", None, 1, true, false);
        let mid = object("Employees", Some(top.id), 1, true, true);
        let action = object("Employee Delete", Some(mid.id), 1, false, false);
        let objects = [top.clone(), mid.clone(), action.clone()];

        let granted = HashSet::from([action.id]);
        let snapshot = resolve(Uuid::new_v4(), &objects, &granted);

        assert!(snapshot.allows_object(action.id));
        assert!(snapshot.allows_object(mid.id));
        assert!(snapshot.allows_object(top.id));
    }

    #[test]
    fn test_menu_excludes_action_nodes() {
        let menu = object("Employees", None, 1, true, true);
        let action = object("Employee Delete", Some(menu.id), 1, false, false);
        let objects = [menu.clone(), action.clone()];

        let granted = HashSet::from([action.id]);
        let snapshot = resolve(Uuid::new_v4(), &objects, &granted);

        assert_eq!(snapshot.menu.len(), 1);
        assert_eq!(snapshot.menu[0].id, menu.id);
        assert!(snapshot.menu[0].children.is_empty());
    }

    #[test]
    fn test_ungranted_sibling_stays_hidden() {
        let top = object("Master Data", None, 1, true, false);
        let granted_child = object("Employees", Some(top.id), 1, true, true);
        let hidden_child = object("Divisions", Some(top.id), 2, true, true);
        let objects = [top.clone(), granted_child.clone(), hidden_child.clone()];

        let granted = HashSet::from([granted_child.id]);
        let snapshot = resolve(Uuid::new_v4(), &objects, &granted);

        assert!(!snapshot.allows_object(hidden_child.id));
        let top_node = &snapshot.menu[0];
        assert_eq!(top_node.children.len(), 1);
        assert_eq!(top_node.children[0].id, granted_child.id);
    }

    #[test]
    fn test_inactive_object_ignored_even_when_granted() {
        let mut menu = object("Employees", None, 1, true, true);
        menu.status = ObjectStatus::Inactive;

        let granted = HashSet::from([menu.id]);
        let snapshot = resolve(Uuid::new_v4(), &[menu.clone()], &granted);

        assert!(!snapshot.allows_object(menu.id));
        assert!(snapshot.menu.is_empty());
        assert!(snapshot.routes.is_empty());
    }

    #[test]
    fn test_unknown_grant_id_ignored() {
        let menu = object("Employees", None, 1, true, true);
        let granted = HashSet::from([menu.id, Uuid::new_v4()]);
        let snapshot = resolve(Uuid::new_v4(), &[menu.clone()], &granted);

        assert_eq!(snapshot.object_ids.len(), 1);
    }

    #[test]
    fn test_route_table_needs_route_and_component() {
        let routable = object("Employees", None, 1, true, true);
        let mut half = object("Reports", None, 2, true, true);
        half.component_ref = None;
        let objects = [routable.clone(), half.clone()];

        let granted = HashSet::from([routable.id, half.id]);
        let snapshot = resolve(Uuid::new_v4(), &objects, &granted);

        assert_eq!(snapshot.routes.len(), 1);
        assert_eq!(snapshot.routes[0].object_id, routable.id);
        assert_eq!(snapshot.routes[0].route, "/employees");
    }

    #[test]
    fn test_component_map() {
        let menu = object("Employees", None, 1, true, true);
        let granted = HashSet::from([menu.id]);
        let snapshot = resolve(Uuid::new_v4(), &[menu.clone()], &granted);

        assert!(snapshot.allows_component("EmployeesPage"));
        assert_eq!(snapshot.by_component.get("EmployeesPage"), Some(&menu.id));
        assert!(!snapshot.allows_component("SomethingElse"));
    }

    #[test]
    fn test_empty_grants_produce_empty_snapshot() {
        let menu = object("Employees", None, 1, true, true);
        let snapshot = resolve(Uuid::new_v4(), &[menu], &HashSet::new());

        assert!(snapshot.menu.is_empty());
        assert!(snapshot.routes.is_empty());
        assert!(snapshot.object_ids.is_empty());
    }
}
