//! Reference key/value configuration entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A configuration row, addressed by `(group_key, item_key)`. Groups hold
/// related settings, e.g. the `attendance` group holds the clock windows.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReferenceItem {
    pub id: Uuid,

    #[validate(length(min = 2, max = 50, message = "Group key must be between 2 and 50 characters"))]
    pub group_key: String,

    #[validate(length(min = 2, max = 50, message = "Item key must be between 2 and 50 characters"))]
    pub item_key: String,

    #[validate(length(min = 1, max = 255, message = "Value must be between 1 and 255 characters"))]
    pub value: String,

    #[validate(length(max = 150, message = "Label too long"))]
    pub label: Option<String>,

    pub sort_order: i32,
    pub is_active: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl ReferenceItem {
    pub fn new(
        group_key: String,
        item_key: String,
        value: String,
        label: Option<String>,
        sort_order: i32,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: Uuid::new_v4(),
            group_key: group_key.trim().to_lowercase(),
            item_key: item_key.trim().to_lowercase(),
            value: value.trim().to_string(),
            label: label.map(|l| l.trim().to_string()),
            sort_order,
            is_active: true,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
            removed_at: None,
            removed_by: None,
        };

        item.validate()?;
        Ok(item)
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
    fn test_keys_are_lowercased() {
        let item = ReferenceItem::new(
            "Attendance".to_string(),
            "Clock_In_Start".to_string(),
            "06:00".to_string(),
            None,
            1,
            None,
        )
        .unwrap();
        assert_eq!(item.group_key, "attendance");
        assert_eq!(item.item_key, "clock_in_start");
    }
}
