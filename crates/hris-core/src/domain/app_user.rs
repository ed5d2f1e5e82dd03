//! Admin console user entity. Credentials live with the identity provider,
//! not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppUser {
    pub id: Uuid,

    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    pub employee_id: Option<Uuid>,
    pub role_id: Uuid,
    pub is_active: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl AppUser {
    pub fn new(
        username: String,
        email: String,
        employee_id: Option<Uuid>,
        role_id: Uuid,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            username: username.trim().to_lowercase(),
            email: email.trim().to_lowercase(),
            employee_id,
            role_id,
            is_active: true,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
            removed_at: None,
            removed_by: None,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn soft_delete(&mut self, deleted_by: Option<Uuid>) {
        self.removed_at = Some(Utc::now());
        self.removed_by = deleted_by;
        self.is_active = false;
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user() {
        let user = AppUser::new(
            "Rina.W".to_string(),
            "rina@example.com".to_string(),
            Some(Uuid::new_v4()),
            Uuid::new_v4(),
            None,
        )
        .unwrap();
        assert_eq!(user.username, "rina.w");
        assert!(user.is_active);
    }
}
