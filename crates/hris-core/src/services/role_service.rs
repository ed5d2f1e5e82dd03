//! Role CRUD service

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Role;
use crate::error::DomainError;
use crate::repositories::{AppUserRepository, RoleRepository};

#[derive(Debug, Deserialize)]
pub struct RoleInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn AppUserRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, users: Arc<dyn AppUserRepository>) -> Self {
        Self { roles, users }
    }

    pub async fn get(&self, id: &Uuid) -> Result<Role, DomainError> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RoleNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Role>, DomainError> {
        self.roles.list_all().await
    }

    pub async fn create(
        &self,
        input: RoleInput,
        created_by: Option<Uuid>,
    ) -> Result<Role, DomainError> {
        let name = input.name.trim().to_string();
        if self.roles.find_by_name(&name).await?.is_some() {
            return Err(DomainError::RoleNameAlreadyExists(name));
        }

        let role = Role::new(name, input.description, created_by)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let created = self.roles.create(&role).await?;
        info!(role_id = %created.id, "Role created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: RoleInput,
        modified_by: Option<Uuid>,
    ) -> Result<Role, DomainError> {
        let mut role = self.get(id).await?;

        let name = input.name.trim().to_string();
        if name != role.name {
            if let Some(existing) = self.roles.find_by_name(&name).await? {
                if existing.id != role.id {
                    return Err(DomainError::RoleNameAlreadyExists(name));
                }
            }
        }

        role.name = name;
        role.description = input.description.map(|d| d.trim().to_string());
        role.modified_at = Some(Utc::now());
        role.modified_by = modified_by;
        role.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.roles.update(&role).await
    }

    /// Soft delete, blocked while any user still holds the role.
    pub async fn delete(&self, id: &Uuid, deleted_by: Option<Uuid>) -> Result<(), DomainError> {
        let mut role = self.get(id).await?;

        if self.users.count_by_role(id).await? > 0 {
            return Err(DomainError::RoleInUse);
        }

        role.soft_delete(deleted_by);
        self.roles.update(&role).await?;
        info!(role_id = %role.id, "Role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockAppUserRepository, MockRoleRepository};

    #[tokio::test]
    async fn test_delete_blocked_while_role_in_use() {
        let role = Role::new("HR Admin".to_string(), None, None).unwrap();
        let role_id = role.id;

        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(move |_| Ok(Some(role.clone())));

        let mut users = MockAppUserRepository::new();
        users.expect_count_by_role().returning(|_| Ok(3));

        let service = RoleService::new(Arc::new(roles), Arc::new(users));
        let result = service.delete(&role_id, None).await;
        assert!(matches!(result, Err(DomainError::RoleInUse)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let existing = Role::new("HR Admin".to_string(), None, None).unwrap();

        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = RoleService::new(Arc::new(roles), Arc::new(MockAppUserRepository::new()));
        let result = service
            .create(
                RoleInput {
                    name: "HR Admin".to_string(),
                    description: None,
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::RoleNameAlreadyExists(_))));
    }
}
