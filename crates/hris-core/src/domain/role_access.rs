// ============================================================================
// HRIS Core - Role Access Entity
// File: crates/hris-core/src/domain/role_access.rs
// Description: Grant row linking a role to an app object
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role Access entity. A role's grants are saved as a full replacement of
/// its row set, never patched row by row, and carry no version column:
/// two admins saving concurrently race and the last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAccess {
    pub id: Uuid,
    pub role_id: Uuid,
    pub object_id: Uuid,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl RoleAccess {
    pub fn new(role_id: Uuid, object_id: Uuid, created_by: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role_id,
            object_id,
            created_at: Utc::now(),
            created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_role_access() {
        let grant = RoleAccess::new(Uuid::new_v4(), Uuid::new_v4(), None);
        assert_ne!(grant.id, grant.role_id);
    }
}
