// ============================================================================
// HRIS Core - Object Service
// File: crates/hris-core/src/services/object_service.rs
// ============================================================================
//! Mutations of the object hierarchy. Every operation that changes group
//! membership re-derives the contiguous per-parent ordering afterwards and
//! drops cached access snapshots.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{AppObject, ObjectStatus};
use crate::error::DomainError;
use crate::hierarchy::{self, ObjectNode};
use crate::repositories::ObjectRepository;
use crate::services::access_service::AccessCache;

#[derive(Debug, Deserialize)]
pub struct CreateObjectInput {
    pub name: String,
    pub access_name: String,
    pub route: Option<String>,
    pub component_ref: Option<String>,
    pub is_menu: bool,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateObjectInput {
    pub name: String,
    pub access_name: String,
    pub route: Option<String>,
    pub component_ref: Option<String>,
    pub icon: Option<String>,
    pub status: ObjectStatus,
}

#[derive(Debug, Deserialize)]
pub struct MoveObjectInput {
    pub new_parent_id: Option<Uuid>,
    /// 0-based position within the target group; appended when omitted.
    pub position: Option<usize>,
}

pub struct ObjectService {
    objects: Arc<dyn ObjectRepository>,
    access_cache: Arc<AccessCache>,
}

impl ObjectService {
    pub fn new(objects: Arc<dyn ObjectRepository>, access_cache: Arc<AccessCache>) -> Self {
        Self {
            objects,
            access_cache,
        }
    }

    pub async fn get(&self, id: &Uuid) -> Result<AppObject, DomainError> {
        self.objects
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ObjectNotFound)
    }

    pub async fn list(&self) -> Result<Vec<AppObject>, DomainError> {
        self.objects.list_all().await
    }

    pub async fn tree(&self) -> Result<Vec<ObjectNode>, DomainError> {
        let objects = self.objects.list_all().await?;
        Ok(hierarchy::build_tree(&objects))
    }

    pub async fn create(
        &self,
        input: CreateObjectInput,
        created_by: Option<Uuid>,
    ) -> Result<AppObject, DomainError> {
        self.check_parent(input.parent_id).await?;

        let access_name = input.access_name.trim().to_string();
        if self
            .objects
            .find_by_access_name(&access_name)
            .await?
            .is_some()
        {
            return Err(DomainError::AccessNameAlreadyExists(access_name));
        }

        let siblings = self.objects.list_children(input.parent_id).await?;
        let sort_order = hierarchy::next_sort_order(&siblings);

        let object = AppObject::new(
            input.name,
            access_name,
            input.route,
            input.component_ref,
            input.is_menu,
            input.icon,
            input.parent_id,
            sort_order,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.objects.create(&object).await?;
        self.access_cache.clear();

        info!(object_id = %created.id, parent_id = ?created.parent_id, "Object created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateObjectInput,
        modified_by: Option<Uuid>,
    ) -> Result<AppObject, DomainError> {
        let mut object = self.get(id).await?;

        let access_name = input.access_name.trim().to_string();
        if access_name != object.access_name {
            if let Some(existing) = self.objects.find_by_access_name(&access_name).await? {
                if existing.id != object.id {
                    return Err(DomainError::AccessNameAlreadyExists(access_name));
                }
            }
        }

        object.name = input.name.trim().to_string();
        object.access_name = access_name;
        object.route = input
            .route
            .map(|r| hris_shared::utils::normalize_route(&r));
        object.component_ref = input.component_ref.map(|c| c.trim().to_string());
        object.icon = input.icon.map(|i| i.trim().to_string());
        object.status = input.status;
        object.modified_at = Some(Utc::now());
        object.modified_by = modified_by;

        object
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let updated = self.objects.update(&object).await?;
        self.access_cache.clear();
        Ok(updated)
    }

    /// Reparent and/or reposition a node. Rejects any parent assignment
    /// that would make the node its own ancestor, then renumbers the target
    /// group and, when the node changed groups, the group it left.
    pub async fn move_object(
        &self,
        id: &Uuid,
        input: MoveObjectInput,
        moved_by: Option<Uuid>,
    ) -> Result<AppObject, DomainError> {
        let mut object = self.get(id).await?;
        self.check_parent(input.new_parent_id).await?;

        if input.new_parent_id.is_some() {
            let all = self.objects.list_all().await?;
            if hierarchy::would_create_cycle(&all, object.id, input.new_parent_id) {
                return Err(DomainError::CycleDetected(input.new_parent_id.unwrap_or(object.id)));
            }
        }

        let old_parent_id = object.parent_id;
        object.parent_id = input.new_parent_id;
        object.modified_at = Some(Utc::now());
        object.modified_by = moved_by;
        let mut object = self.objects.update(&object).await?;

        let target_siblings: Vec<AppObject> = self
            .objects
            .list_children(input.new_parent_id)
            .await?
            .into_iter()
            .filter(|o| o.id != object.id)
            .collect();
        let assignments = hierarchy::sequence_with_insert(
            &target_siblings,
            object.id,
            input.position.unwrap_or(usize::MAX),
        );
        if let Some((_, order)) = assignments.iter().find(|(assigned, _)| *assigned == object.id) {
            object.sort_order = *order;
        }
        self.objects.update_sort_orders(&assignments).await?;

        if old_parent_id != input.new_parent_id {
            let old_group = self.objects.list_children(old_parent_id).await?;
            let changes = hierarchy::renumber(&old_group);
            if !changes.is_empty() {
                self.objects.update_sort_orders(&changes).await?;
            }
        }

        self.access_cache.clear();
        info!(object_id = %object.id, new_parent_id = ?input.new_parent_id, "Object moved");
        Ok(object)
    }

    /// Duplicate a node and its direct children at the end of the same
    /// parent group.
    pub async fn copy(&self, id: &Uuid, created_by: Option<Uuid>) -> Result<AppObject, DomainError> {
        let source = self.get(id).await?;
        let access_name = self.unique_access_name(&source.access_name).await?;

        let siblings = self.objects.list_children(source.parent_id).await?;
        let sort_order = hierarchy::next_sort_order(&siblings);

        let copy = AppObject::new(
            copy_name(&source.name),
            access_name,
            source.route.clone(),
            source.component_ref.clone(),
            source.is_menu,
            source.icon.clone(),
            source.parent_id,
            sort_order,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.objects.create(&copy).await?;

        let children = self.objects.list_children(Some(source.id)).await?;
        if !children.is_empty() {
            let mut copies = Vec::with_capacity(children.len());
            for child in &children {
                let child_access = self.unique_access_name(&child.access_name).await?;
                let child_copy = AppObject::new(
                    child.name.clone(),
                    child_access,
                    child.route.clone(),
                    child.component_ref.clone(),
                    child.is_menu,
                    child.icon.clone(),
                    Some(created.id),
                    child.sort_order,
                    created_by,
                )
                .map_err(|e| DomainError::ValidationError(e.to_string()))?;
                copies.push(child_copy);
            }
            self.objects.create_many(&copies).await?;
        }

        self.access_cache.clear();
        info!(source_id = %source.id, copy_id = %created.id, children = children.len(), "Object copied");
        Ok(created)
    }

    /// Soft delete: blocked while the node still has active children, then
    /// status flips to inactive and the remaining group is renumbered.
    pub async fn delete(&self, id: &Uuid, deleted_by: Option<Uuid>) -> Result<(), DomainError> {
        let mut object = self.get(id).await?;

        let children = self.objects.list_children(Some(object.id)).await?;
        if children.iter().any(|c| c.is_active()) {
            return Err(DomainError::HasActiveChildren);
        }

        let parent_id = object.parent_id;
        object.soft_delete(deleted_by);
        self.objects.update(&object).await?;

        let group = self.objects.list_children(parent_id).await?;
        let changes = hierarchy::renumber(&group);
        if !changes.is_empty() {
            self.objects.update_sort_orders(&changes).await?;
        }

        self.access_cache.clear();
        info!(object_id = %object.id, "Object deleted");
        Ok(())
    }

    /// A parent, when present, must be an active menu node.
    async fn check_parent(&self, parent_id: Option<Uuid>) -> Result<(), DomainError> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let parent = self
            .objects
            .find_by_id(&parent_id)
            .await?
            .ok_or(DomainError::ParentNotFound)?;
        if !parent.is_active() || !parent.is_menu {
            return Err(DomainError::ParentNotMenu);
        }
        Ok(())
    }

    async fn unique_access_name(&self, base: &str) -> Result<String, DomainError> {
        let candidate = format!("{}_copy", base);
        if self.objects.find_by_access_name(&candidate).await?.is_none() {
            return Ok(clamp_len(&candidate));
        }
        for n in 2..=20 {
            let candidate = clamp_len(&format!("{}_copy_{}", base, n));
            if self.objects.find_by_access_name(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(DomainError::UnableToGenerateUniqueName)
    }
}

fn copy_name(name: &str) -> String {
    clamp_len(&format!("{} (copy)", name))
}

fn clamp_len(s: &str) -> String {
    s.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockObjectRepository;
    use std::time::Duration;

    fn cache() -> Arc<AccessCache> {
        Arc::new(AccessCache::new(Duration::from_secs(900)))
    }

    fn menu(name: &str, parent_id: Option<Uuid>, sort_order: i32) -> AppObject {
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

    fn create_input(name: &str, parent_id: Option<Uuid>) -> CreateObjectInput {
        CreateObjectInput {
            name: name.to_string(),
            access_name: name.to_lowercase().replace(' ', "_"),
            route: None,
            component_ref: None,
            is_menu: true,
            icon: None,
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_create_appends_at_end_of_group() {
        let parent = menu("Master Data", None, 1);
        let parent_id = parent.id;
        let existing = menu("Employees", Some(parent_id), 1);

        let mut objects = MockObjectRepository::new();
        let parent_clone = parent.clone();
        objects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(parent_clone.clone())));
        objects
            .expect_find_by_access_name()
            .returning(|_| Ok(None));
        objects
            .expect_list_children()
            .returning(move |_| Ok(vec![existing.clone()]));
        objects
            .expect_create()
            .withf(|o| o.sort_order == 2)
            .returning(|o| Ok(o.clone()));

        let service = ObjectService::new(Arc::new(objects), cache());
        let created = service
            .create(create_input("Divisions", Some(parent_id)), None)
            .await
            .unwrap();
        assert_eq!(created.sort_order, 2);
        assert_eq!(created.parent_id, Some(parent_id));
    }

    #[tokio::test]
    async fn test_create_rejects_action_parent() {
        let mut parent = menu("Employees", None, 1);
        parent.is_menu = false;

        let mut objects = MockObjectRepository::new();
        let parent_clone = parent.clone();
        objects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(parent_clone.clone())));

        let service = ObjectService::new(Arc::new(objects), cache());
        let result = service
            .create(create_input("Employee Delete", Some(parent.id)), None)
            .await;
        assert!(matches!(result, Err(DomainError::ParentNotMenu)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_access_name() {
        let existing = menu("Employees", None, 1);

        let mut objects = MockObjectRepository::new();
        let existing_clone = existing.clone();
        objects
            .expect_find_by_access_name()
            .returning(move |_| Ok(Some(existing_clone.clone())));

        let service = ObjectService::new(Arc::new(objects), cache());
        let result = service.create(create_input("Employees", None), None).await;
        assert!(matches!(
            result,
            Err(DomainError::AccessNameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_move_rejects_cycle() {
        let top = menu("Top", None, 1);
        let child = menu("Child", Some(top.id), 1);
        let all = vec![top.clone(), child.clone()];

        let mut objects = MockObjectRepository::new();
        let top_clone = top.clone();
        let child_clone = child.clone();
        objects.expect_find_by_id().returning(move |id| {
            if *id == top_clone.id {
                Ok(Some(top_clone.clone()))
            } else {
                Ok(Some(child_clone.clone()))
            }
        });
        objects
            .expect_list_all()
            .returning(move || Ok(all.clone()));

        let service = ObjectService::new(Arc::new(objects), cache());
        let result = service
            .move_object(
                &top.id,
                MoveObjectInput {
                    new_parent_id: Some(child.id),
                    position: None,
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::CycleDetected(_))));
    }

    #[tokio::test]
    async fn test_move_renumbers_both_groups() {
        let parent_a = menu("Group A", None, 1);
        let parent_b = menu("Group B", None, 2);
        let moved = menu("Moved", Some(parent_a.id), 1);
        let stays_a = menu("Stays", Some(parent_a.id), 2);
        let in_b = menu("Resident", Some(parent_b.id), 1);

        let all = vec![
            parent_a.clone(),
            parent_b.clone(),
            moved.clone(),
            stays_a.clone(),
            in_b.clone(),
        ];

        let mut objects = MockObjectRepository::new();
        let by_id = all.clone();
        objects.expect_find_by_id().returning(move |id| {
            Ok(by_id.iter().find(|o| o.id == *id).cloned())
        });
        let list_all = all.clone();
        objects
            .expect_list_all()
            .returning(move || Ok(list_all.clone()));
        objects.expect_update().returning(|o| Ok(o.clone()));

        let parent_a_id = parent_a.id;
        let parent_b_id = parent_b.id;
        let moved_after = {
            let mut m = moved.clone();
            m.parent_id = Some(parent_b_id);
            m
        };
        let in_b_clone = in_b.clone();
        let stays_clone = stays_a.clone();
        objects.expect_list_children().returning(move |parent| {
            match parent {
                Some(p) if p == parent_b_id => {
                    Ok(vec![in_b_clone.clone(), moved_after.clone()])
                }
                Some(p) if p == parent_a_id => Ok(vec![stays_clone.clone()]),
                _ => Ok(vec![]),
            }
        });

        let moved_id = moved.id;
        let in_b_id = in_b.id;
        let stays_id = stays_a.id;
        objects
            .expect_update_sort_orders()
            .times(2)
            .withf(move |assignments| {
                // Target group gets the full 1..=n sequence with the moved
                // node appended; the old group compacts back to 1.
                assignments == [(in_b_id, 1), (moved_id, 2)]
                    || assignments == [(stays_id, 1)]
            })
            .returning(|_| Ok(()));

        let service = ObjectService::new(Arc::new(objects), cache());
        let result = service
            .move_object(
                &moved_id,
                MoveObjectInput {
                    new_parent_id: Some(parent_b_id),
                    position: None,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(result.sort_order, 2);
    }

    #[tokio::test]
    async fn test_delete_blocked_by_active_children() {
        let parent = menu("Parent", None, 1);
        let child = menu("Child", Some(parent.id), 1);

        let mut objects = MockObjectRepository::new();
        let parent_clone = parent.clone();
        objects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(parent_clone.clone())));
        objects
            .expect_list_children()
            .returning(move |_| Ok(vec![child.clone()]));

        let service = ObjectService::new(Arc::new(objects), cache());
        let result = service.delete(&parent.id, None).await;
        assert!(matches!(result, Err(DomainError::HasActiveChildren)));
    }

    #[tokio::test]
    async fn test_delete_renumbers_remaining_siblings() {
        let first = menu("First", None, 1);
        let second = menu("Second", None, 2);
        let third = menu("Third", None, 3);

        let mut objects = MockObjectRepository::new();
        let second_clone = second.clone();
        objects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(second_clone.clone())));

        let second_id = second.id;
        let remaining = vec![first.clone(), third.clone()];
        objects.expect_list_children().returning(move |parent| {
            if parent == Some(second_id) {
                Ok(vec![])
            } else {
                Ok(remaining.clone())
            }
        });
        objects
            .expect_update()
            .withf(|o| o.is_deleted())
            .returning(|o| Ok(o.clone()));

        let third_id = third.id;
        objects
            .expect_update_sort_orders()
            .withf(move |assignments| assignments == [(third_id, 2)])
            .returning(|_| Ok(()));

        let service = ObjectService::new(Arc::new(objects), cache());
        service.delete(&second.id, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_copy_duplicates_children() {
        let source = menu("Employees", None, 1);
        let action = {
            let mut a = menu("Employee Delete", Some(source.id), 1);
            a.is_menu = false;
            a
        };

        let mut objects = MockObjectRepository::new();
        let source_clone = source.clone();
        objects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(source_clone.clone())));
        objects
            .expect_find_by_access_name()
            .returning(|_| Ok(None));

        let source_id = source.id;
        let sibling = source.clone();
        let child = action.clone();
        objects.expect_list_children().returning(move |parent| {
            if parent == Some(source_id) {
                Ok(vec![child.clone()])
            } else {
                Ok(vec![sibling.clone()])
            }
        });
        objects
            .expect_create()
            .withf(|o| o.name == "Employees (copy)" && o.access_name == "employees_copy" && o.sort_order == 2)
            .returning(|o| Ok(o.clone()));
        objects
            .expect_create_many()
            .withf(|copies| copies.len() == 1 && !copies[0].is_menu)
            .returning(|_| Ok(()));

        let service = ObjectService::new(Arc::new(objects), cache());
        let copy = service.copy(&source.id, None).await.unwrap();
        assert_eq!(copy.name, "Employees (copy)");
    }
}
