//! Division, position, and reference configuration CRUD service

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Division, Position, ReferenceItem};
use crate::error::DomainError;
use crate::repositories::{DivisionRepository, PositionRepository, ReferenceRepository};

#[derive(Debug, Deserialize)]
pub struct DivisionInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PositionInput {
    pub division_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReferenceInput {
    pub group_key: String,
    pub item_key: String,
    pub value: String,
    pub label: Option<String>,
    pub sort_order: i32,
}

pub struct MasterDataService {
    divisions: Arc<dyn DivisionRepository>,
    positions: Arc<dyn PositionRepository>,
    references: Arc<dyn ReferenceRepository>,
}

impl MasterDataService {
    pub fn new(
        divisions: Arc<dyn DivisionRepository>,
        positions: Arc<dyn PositionRepository>,
        references: Arc<dyn ReferenceRepository>,
    ) -> Self {
        Self {
            divisions,
            positions,
            references,
        }
    }

    // ------------------------------------------------------------------
    // Divisions
    // ------------------------------------------------------------------

    pub async fn get_division(&self, id: &Uuid) -> Result<Division, DomainError> {
        self.divisions
            .find_by_id(id)
            .await?
            .ok_or(DomainError::DivisionNotFound)
    }

    pub async fn list_divisions(&self) -> Result<Vec<Division>, DomainError> {
        self.divisions.list_all().await
    }

    pub async fn create_division(
        &self,
        input: DivisionInput,
        created_by: Option<Uuid>,
    ) -> Result<Division, DomainError> {
        let name = input.name.trim().to_string();
        if self.divisions.find_by_name(&name).await?.is_some() {
            return Err(DomainError::DivisionNameAlreadyExists(name));
        }

        let division = Division::new(name, input.description, created_by)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let created = self.divisions.create(&division).await?;
        info!(division_id = %created.id, "Division created");
        Ok(created)
    }

    pub async fn update_division(
        &self,
        id: &Uuid,
        input: DivisionInput,
        modified_by: Option<Uuid>,
    ) -> Result<Division, DomainError> {
        let mut division = self.get_division(id).await?;

        let name = input.name.trim().to_string();
        if name != division.name {
            if let Some(existing) = self.divisions.find_by_name(&name).await? {
                if existing.id != division.id {
                    return Err(DomainError::DivisionNameAlreadyExists(name));
                }
            }
        }

        division.name = name;
        division.description = input.description.map(|d| d.trim().to_string());
        division.modified_at = Some(Utc::now());
        division.modified_by = modified_by;
        division
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.divisions.update(&division).await
    }

    pub async fn delete_division(
        &self,
        id: &Uuid,
        deleted_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let mut division = self.get_division(id).await?;
        division.soft_delete(deleted_by);
        self.divisions.update(&division).await?;
        info!(division_id = %division.id, "Division deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    pub async fn get_position(&self, id: &Uuid) -> Result<Position, DomainError> {
        self.positions
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PositionNotFound)
    }

    pub async fn list_positions(&self) -> Result<Vec<Position>, DomainError> {
        self.positions.list_all().await
    }

    pub async fn list_positions_by_division(
        &self,
        division_id: &Uuid,
    ) -> Result<Vec<Position>, DomainError> {
        self.positions.list_by_division(division_id).await
    }

    pub async fn create_position(
        &self,
        input: PositionInput,
        created_by: Option<Uuid>,
    ) -> Result<Position, DomainError> {
        self.get_division(&input.division_id).await?;

        let name = input.name.trim().to_string();
        if self
            .positions
            .find_by_name(&input.division_id, &name)
            .await?
            .is_some()
        {
            return Err(DomainError::PositionNameAlreadyExists(name));
        }

        let position = Position::new(input.division_id, name, input.description, created_by)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let created = self.positions.create(&position).await?;
        info!(position_id = %created.id, "Position created");
        Ok(created)
    }

    pub async fn update_position(
        &self,
        id: &Uuid,
        input: PositionInput,
        modified_by: Option<Uuid>,
    ) -> Result<Position, DomainError> {
        let mut position = self.get_position(id).await?;
        self.get_division(&input.division_id).await?;

        let name = input.name.trim().to_string();
        if name != position.name || input.division_id != position.division_id {
            if let Some(existing) = self
                .positions
                .find_by_name(&input.division_id, &name)
                .await?
            {
                if existing.id != position.id {
                    return Err(DomainError::PositionNameAlreadyExists(name));
                }
            }
        }

        position.division_id = input.division_id;
        position.name = name;
        position.description = input.description.map(|d| d.trim().to_string());
        position.modified_at = Some(Utc::now());
        position.modified_by = modified_by;
        position
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.positions.update(&position).await
    }

    pub async fn delete_position(
        &self,
        id: &Uuid,
        deleted_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let mut position = self.get_position(id).await?;
        position.soft_delete(deleted_by);
        self.positions.update(&position).await?;
        info!(position_id = %position.id, "Position deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reference configuration
    // ------------------------------------------------------------------

    pub async fn get_reference(&self, id: &Uuid) -> Result<ReferenceItem, DomainError> {
        self.references
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReferenceNotFound)
    }

    pub async fn list_references(&self, group_key: &str) -> Result<Vec<ReferenceItem>, DomainError> {
        self.references
            .list_by_group(&group_key.trim().to_lowercase())
            .await
    }

    pub async fn create_reference(
        &self,
        input: ReferenceInput,
        created_by: Option<Uuid>,
    ) -> Result<ReferenceItem, DomainError> {
        let group_key = input.group_key.trim().to_lowercase();
        let item_key = input.item_key.trim().to_lowercase();
        if self
            .references
            .find_by_key(&group_key, &item_key)
            .await?
            .is_some()
        {
            return Err(DomainError::ReferenceKeyAlreadyExists {
                group_key,
                item_key,
            });
        }

        let item = ReferenceItem::new(
            group_key,
            item_key,
            input.value,
            input.label,
            input.sort_order,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.references.create(&item).await?;
        info!(reference_id = %created.id, group = %created.group_key, "Reference item created");
        Ok(created)
    }

    pub async fn update_reference(
        &self,
        id: &Uuid,
        input: ReferenceInput,
        modified_by: Option<Uuid>,
    ) -> Result<ReferenceItem, DomainError> {
        let mut item = self.get_reference(id).await?;

        let group_key = input.group_key.trim().to_lowercase();
        let item_key = input.item_key.trim().to_lowercase();
        if group_key != item.group_key || item_key != item.item_key {
            if let Some(existing) = self.references.find_by_key(&group_key, &item_key).await? {
                if existing.id != item.id {
                    return Err(DomainError::ReferenceKeyAlreadyExists {
                        group_key,
                        item_key,
                    });
                }
            }
        }

        item.group_key = group_key;
        item.item_key = item_key;
        item.value = input.value.trim().to_string();
        item.label = input.label.map(|l| l.trim().to_string());
        item.sort_order = input.sort_order;
        item.modified_at = Some(Utc::now());
        item.modified_by = modified_by;
        item.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.references.update(&item).await
    }

    pub async fn delete_reference(
        &self,
        id: &Uuid,
        deleted_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let mut item = self.get_reference(id).await?;
        item.soft_delete(deleted_by);
        self.references.update(&item).await?;
        info!(reference_id = %item.id, "Reference item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        MockDivisionRepository, MockPositionRepository, MockReferenceRepository,
    };

    #[tokio::test]
    async fn test_reference_key_unique_within_group() {
        let existing = ReferenceItem::new(
            "attendance".to_string(),
            "clock_in_start".to_string(),
            "06:00".to_string(),
            None,
            1,
            None,
        )
        .unwrap();

        let mut references = MockReferenceRepository::new();
        references
            .expect_find_by_key()
            .returning(move |_, _| Ok(Some(existing.clone())));

        let service = MasterDataService::new(
            Arc::new(MockDivisionRepository::new()),
            Arc::new(MockPositionRepository::new()),
            Arc::new(references),
        );

        let result = service
            .create_reference(
                ReferenceInput {
                    group_key: "Attendance".to_string(),
                    item_key: "CLOCK_IN_START".to_string(),
                    value: "05:30".to_string(),
                    label: None,
                    sort_order: 1,
                },
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(DomainError::ReferenceKeyAlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_position_requires_existing_division() {
        let mut divisions = MockDivisionRepository::new();
        divisions.expect_find_by_id().returning(|_| Ok(None));

        let service = MasterDataService::new(
            Arc::new(divisions),
            Arc::new(MockPositionRepository::new()),
            Arc::new(MockReferenceRepository::new()),
        );

        let result = service
            .create_position(
                PositionInput {
                    division_id: Uuid::new_v4(),
                    name: "Backend Engineer".to_string(),
                    description: None,
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::DivisionNotFound)));
    }
}
