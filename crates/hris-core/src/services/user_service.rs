//! App user CRUD service

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::AppUser;
use crate::error::DomainError;
use crate::repositories::{AppUserRepository, EmployeeRepository, RoleRepository};

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub employee_id: Option<Uuid>,
    pub role_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub email: String,
    pub employee_id: Option<Uuid>,
    pub role_id: Uuid,
    pub is_active: bool,
}

pub struct UserService {
    users: Arc<dyn AppUserRepository>,
    roles: Arc<dyn RoleRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn AppUserRepository>,
        roles: Arc<dyn RoleRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            users,
            roles,
            employees,
        }
    }

    pub async fn get(&self, id: &Uuid) -> Result<AppUser, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub async fn list(&self) -> Result<Vec<AppUser>, DomainError> {
        self.users.list_all().await
    }

    pub async fn create(
        &self,
        input: CreateUserInput,
        created_by: Option<Uuid>,
    ) -> Result<AppUser, DomainError> {
        self.check_links(&input.role_id, input.employee_id.as_ref())
            .await?;

        let username = input.username.trim().to_lowercase();
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyExists(username));
        }

        let user = AppUser::new(
            username,
            input.email,
            input.employee_id,
            input.role_id,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.users.create(&user).await?;
        info!(user_id = %created.id, username = %created.username, "User created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateUserInput,
        modified_by: Option<Uuid>,
    ) -> Result<AppUser, DomainError> {
        let mut user = self.get(id).await?;
        self.check_links(&input.role_id, input.employee_id.as_ref())
            .await?;

        user.email = input.email.trim().to_lowercase();
        user.employee_id = input.employee_id;
        user.role_id = input.role_id;
        user.is_active = input.is_active;
        user.modified_at = Some(Utc::now());
        user.modified_by = modified_by;
        user.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.users.update(&user).await
    }

    pub async fn delete(&self, id: &Uuid, deleted_by: Option<Uuid>) -> Result<(), DomainError> {
        let mut user = self.get(id).await?;
        user.soft_delete(deleted_by);
        self.users.update(&user).await?;
        info!(user_id = %user.id, "User deleted");
        Ok(())
    }

    async fn check_links(
        &self,
        role_id: &Uuid,
        employee_id: Option<&Uuid>,
    ) -> Result<(), DomainError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound)?;

        if let Some(employee_id) = employee_id {
            self.employees
                .find_by_id(employee_id)
                .await?
                .ok_or(DomainError::EmployeeNotFound)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::{
        MockAppUserRepository, MockEmployeeRepository, MockRoleRepository,
    };

    #[tokio::test]
    async fn test_create_rejects_unknown_role() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(
            Arc::new(MockAppUserRepository::new()),
            Arc::new(roles),
            Arc::new(MockEmployeeRepository::new()),
        );

        let result = service
            .create(
                CreateUserInput {
                    username: "rina.w".to_string(),
                    email: "rina@example.com".to_string(),
                    employee_id: None,
                    role_id: Uuid::new_v4(),
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::RoleNotFound)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let role = Role::new("HR Admin".to_string(), None, None).unwrap();
        let role_id = role.id;

        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(move |_| Ok(Some(role.clone())));

        let existing = AppUser::new(
            "rina.w".to_string(),
            "rina@example.com".to_string(),
            None,
            role_id,
            None,
        )
        .unwrap();

        let mut users = MockAppUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = UserService::new(
            Arc::new(users),
            Arc::new(roles),
            Arc::new(MockEmployeeRepository::new()),
        );

        let result = service
            .create(
                CreateUserInput {
                    username: "Rina.W".to_string(),
                    email: "other@example.com".to_string(),
                    employee_id: None,
                    role_id,
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::UsernameAlreadyExists(_))));
    }
}
