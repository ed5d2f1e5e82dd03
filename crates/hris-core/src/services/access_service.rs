// ============================================================================
// HRIS Core - Access Service
// File: crates/hris-core/src/services/access_service.rs
// ============================================================================
//! Role access grants and snapshot resolution with a staleness window.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{self, AccessSnapshot};
use crate::error::DomainError;
use crate::repositories::{ObjectRepository, RoleAccessRepository, RoleRepository};

/// Per-role snapshot cache. A snapshot older than the staleness window is
/// rebuilt on the next read; any object or grant mutation drops the whole
/// cache so clients pick up changes immediately.
pub struct AccessCache {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, (Instant, Arc<AccessSnapshot>)>>,
}

impl AccessCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, role_id: &Uuid) -> Option<Arc<AccessSnapshot>> {
        let entries = self.entries.read().ok()?;
        let (built, snapshot) = entries.get(role_id)?;
        if built.elapsed() > self.ttl {
            return None;
        }
        Some(Arc::clone(snapshot))
    }

    pub fn insert(&self, role_id: Uuid, snapshot: Arc<AccessSnapshot>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(role_id, (Instant::now(), snapshot));
        }
    }

    pub fn invalidate(&self, role_id: &Uuid) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(role_id);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

/// Access service: saves a role's grant set and resolves it into the
/// snapshot the admin console consumes.
pub struct AccessService {
    objects: Arc<dyn ObjectRepository>,
    roles: Arc<dyn RoleRepository>,
    grants: Arc<dyn RoleAccessRepository>,
    cache: Arc<AccessCache>,
}

impl AccessService {
    pub fn new(
        objects: Arc<dyn ObjectRepository>,
        roles: Arc<dyn RoleRepository>,
        grants: Arc<dyn RoleAccessRepository>,
        cache: Arc<AccessCache>,
    ) -> Self {
        Self {
            objects,
            roles,
            grants,
            cache,
        }
    }

    /// The raw grant set as stored, without ancestor expansion.
    pub async fn granted_object_ids(&self, role_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound)?;
        self.grants.list_object_ids(role_id).await
    }

    /// Replace a role's grants with `object_ids`.
    ///
    /// Grants are a full replacement, not a diff; there is no optimistic
    /// locking, so of two concurrent saves the later one wins.
    pub async fn replace_for_role(
        &self,
        role_id: &Uuid,
        object_ids: &[Uuid],
        saved_by: Option<Uuid>,
    ) -> Result<usize, DomainError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound)?;

        let known: HashSet<Uuid> = self
            .objects
            .list_all()
            .await?
            .into_iter()
            .filter(|o| o.is_active())
            .map(|o| o.id)
            .collect();

        let mut seen = HashSet::new();
        let accepted: Vec<Uuid> = object_ids
            .iter()
            .copied()
            .filter(|id| known.contains(id) && seen.insert(*id))
            .collect();

        let dropped = object_ids.len() - accepted.len();
        if dropped > 0 {
            warn!(
                role_id = %role_id,
                dropped,
                "Ignoring grant ids that are duplicated, unknown, or inactive"
            );
        }

        self.grants
            .replace_for_role(role_id, &accepted, saved_by)
            .await?;
        self.cache.invalidate(role_id);

        info!(role_id = %role_id, granted = accepted.len(), "Role access replaced");
        Ok(accepted.len())
    }

    /// Resolve the role's snapshot, serving a cached copy while it is
    /// within the staleness window.
    pub async fn snapshot(&self, role_id: &Uuid) -> Result<Arc<AccessSnapshot>, DomainError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound)?;

        if let Some(snapshot) = self.cache.get(role_id) {
            return Ok(snapshot);
        }

        let objects = self.objects.list_all().await?;
        let granted: HashSet<Uuid> = self
            .grants
            .list_object_ids(role_id)
            .await?
            .into_iter()
            .collect();

        let snapshot = Arc::new(access::resolve(*role_id, &objects, &granted));
        self.cache.insert(*role_id, Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppObject, Role};
    use crate::repositories::{
        MockObjectRepository, MockRoleAccessRepository, MockRoleRepository,
    };

    fn role() -> Role {
        Role::new("HR Admin".to_string(), None, None).unwrap()
    }

    fn menu(name: &str) -> AppObject {
        AppObject::new(
            name.to_string(),
            name.to_lowercase(),
            Some(format!("/{}", name.to_lowercase())),
            Some(format!("{}Page", name)),
            true,
            None,
            None,
            1,
            None,
        )
        .unwrap()
    }

    fn cache() -> Arc<AccessCache> {
        Arc::new(AccessCache::new(Duration::from_secs(900)))
    }

    #[tokio::test]
    async fn test_replace_filters_unknown_and_duplicate_ids() {
        let role = role();
        let object = menu("Employees");
        let object_id = object.id;

        let mut roles = MockRoleRepository::new();
        let role_clone = role.clone();
        roles
            .expect_find_by_id()
            .returning(move |_| Ok(Some(role_clone.clone())));

        let mut objects = MockObjectRepository::new();
        objects
            .expect_list_all()
            .returning(move || Ok(vec![object.clone()]));

        let mut grants = MockRoleAccessRepository::new();
        grants
            .expect_replace_for_role()
            .withf(move |_, ids, _| ids == [object_id])
            .returning(|_, _, _| Ok(()));

        let service = AccessService::new(
            Arc::new(objects),
            Arc::new(roles),
            Arc::new(grants),
            cache(),
        );

        let saved = service
            .replace_for_role(&role.id, &[object_id, object_id, Uuid::new_v4()], None)
            .await
            .unwrap();
        assert_eq!(saved, 1);
    }

    #[tokio::test]
    async fn test_replace_unknown_role() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));

        let service = AccessService::new(
            Arc::new(MockObjectRepository::new()),
            Arc::new(roles),
            Arc::new(MockRoleAccessRepository::new()),
            cache(),
        );

        let result = service.replace_for_role(&Uuid::new_v4(), &[], None).await;
        assert!(matches!(result, Err(DomainError::RoleNotFound)));
    }

    #[tokio::test]
    async fn test_snapshot_is_cached_until_invalidated() {
        let role = role();
        let object = menu("Employees");

        let mut roles = MockRoleRepository::new();
        let role_clone = role.clone();
        roles
            .expect_find_by_id()
            .returning(move |_| Ok(Some(role_clone.clone())));

        let service_cache = cache();

        let mut objects = MockObjectRepository::new();
        let object_clone = object.clone();
        objects
            .expect_list_all()
            .times(2)
            .returning(move || Ok(vec![object_clone.clone()]));

        let mut grants = MockRoleAccessRepository::new();
        let object_id = object.id;
        grants
            .expect_list_object_ids()
            .times(2)
            .returning(move |_| Ok(vec![object_id]));

        let service = AccessService::new(
            Arc::new(objects),
            Arc::new(roles),
            Arc::new(grants),
            Arc::clone(&service_cache),
        );

        let first = service.snapshot(&role.id).await.unwrap();
        let second = service.snapshot(&role.id).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        service_cache.invalidate(&role.id);
        let third = service.snapshot(&role.id).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.allows_object(object_id));
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let cache = AccessCache::new(Duration::from_millis(0));
        let role_id = Uuid::new_v4();
        let snapshot = Arc::new(access::resolve(role_id, &[], &HashSet::new()));
        cache.insert(role_id, snapshot);

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&role_id).is_none());
    }
}
