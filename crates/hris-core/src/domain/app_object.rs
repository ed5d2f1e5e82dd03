// ============================================================================
// HRIS Core - App Object Entity
// File: crates/hris-core/src/domain/app_object.rs
// Description: Menu/action node of the dynamic object hierarchy
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Object status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    Active,
    Inactive,
}

impl ObjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectStatus::Active => "active",
            ObjectStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ObjectStatus::Active),
            "inactive" => Some(ObjectStatus::Inactive),
            _ => None,
        }
    }
}

impl Default for ObjectStatus {
    fn default() -> Self {
        ObjectStatus::Active
    }
}

/// App Object entity. Objects form a parent/child hierarchy: menu nodes
/// build the navigation tree, action nodes hang off a menu and gate
/// fine-grained operations. Siblings carry an explicit `sort_order`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppObject {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Object name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 100, message = "Access name must be between 2 and 100 characters"))]
    pub access_name: String,

    #[validate(length(max = 255, message = "Route too long"))]
    pub route: Option<String>,

    #[validate(length(max = 100, message = "Component reference too long"))]
    pub component_ref: Option<String>,

    pub is_menu: bool,

    #[validate(length(max = 100, message = "Icon too long"))]
    pub icon: Option<String>,

    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub status: ObjectStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl AppObject {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        access_name: String,
        route: Option<String>,
        component_ref: Option<String>,
        is_menu: bool,
        icon: Option<String>,
        parent_id: Option<Uuid>,
        sort_order: i32,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let object = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            access_name: access_name.trim().to_string(),
            route: route.map(|r| hris_shared::utils::normalize_route(&r)),
            component_ref: component_ref.map(|c| c.trim().to_string()),
            is_menu,
            icon: icon.map(|i| i.trim().to_string()),
            parent_id,
            sort_order,
            status: ObjectStatus::Active,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
            removed_at: None,
            removed_by: None,
        };

        object.validate()?;
        Ok(object)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_action(&self) -> bool {
        !self.is_menu
    }

    pub fn is_active(&self) -> bool {
        self.status == ObjectStatus::Active && self.removed_at.is_none()
    }

    /// Whether the node can appear in a route table.
    pub fn is_routable(&self) -> bool {
        self.route.is_some() && self.component_ref.is_some()
    }

    pub fn soft_delete(&mut self, deleted_by: Option<Uuid>) {
        self.status = ObjectStatus::Inactive;
        self.removed_at = Some(Utc::now());
        self.removed_by = deleted_by;
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_object() -> AppObject {
        AppObject::new(
            "Dashboard".to_string(),
            "dashboard".to_string(),
            Some("/dashboard".to_string()),
            Some("DashboardPage".to_string()),
            true,
            Some("home".to_string()),
            None,
            1,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_create_object() {
        let object = menu_object();
        assert!(object.is_root());
        assert!(object.is_active());
        assert!(object.is_routable());
    }

    #[test]
    fn test_route_is_normalized() {
        let object = AppObject::new(
            "Employees".to_string(),
            "employees".to_string(),
            Some("employees/".to_string()),
            Some("EmployeeList".to_string()),
            true,
            None,
            None,
            1,
            None,
        )
        .unwrap();
        assert_eq!(object.route.as_deref(), Some("/employees"));
    }

    #[test]
    fn test_name_too_short_rejected() {
        let result = AppObject::new(
            "D".to_string(),
            "dashboard".to_string(),
            None,
            None,
            true,
            None,
            None,
            1,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_soft_delete() {
        let mut object = menu_object();
        object.soft_delete(Some(Uuid::new_v4()));
        assert!(object.is_deleted());
        assert!(!object.is_active());
        assert_eq!(object.status, ObjectStatus::Inactive);
    }
}
