//! Employee CRUD service

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use hris_shared::types::Pagination;

use crate::domain::{Employee, EmployeeStatus};
use crate::error::DomainError;
use crate::repositories::{DivisionRepository, EmployeeRepository, PositionRepository};

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeInput {
    pub employee_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub division_id: Uuid,
    pub position_id: Uuid,
    pub join_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeInput {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub division_id: Uuid,
    pub position_id: Uuid,
    pub status: EmployeeStatus,
}

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    divisions: Arc<dyn DivisionRepository>,
    positions: Arc<dyn PositionRepository>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        divisions: Arc<dyn DivisionRepository>,
        positions: Arc<dyn PositionRepository>,
    ) -> Self {
        Self {
            employees,
            divisions,
            positions,
        }
    }

    pub async fn get(&self, id: &Uuid) -> Result<Employee, DomainError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(DomainError::EmployeeNotFound)
    }

    pub async fn list(&self, page: &Pagination) -> Result<Vec<Employee>, DomainError> {
        self.employees.list_all(page).await
    }

    pub async fn list_by_division(&self, division_id: &Uuid) -> Result<Vec<Employee>, DomainError> {
        self.employees.list_by_division(division_id).await
    }

    pub async fn create(
        &self,
        input: CreateEmployeeInput,
        created_by: Option<Uuid>,
    ) -> Result<Employee, DomainError> {
        self.check_org(&input.division_id, &input.position_id).await?;

        let number = input.employee_number.trim().to_string();
        if self.employees.find_by_number(&number).await?.is_some() {
            return Err(DomainError::EmployeeNumberAlreadyExists(number));
        }

        let email = input.email.trim().to_lowercase();
        if self.employees.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists(email));
        }

        let employee = Employee::new(
            number,
            input.full_name,
            email,
            input.phone,
            input.division_id,
            input.position_id,
            input.join_date,
            created_by,
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.employees.create(&employee).await?;
        info!(employee_id = %created.id, number = %created.employee_number, "Employee created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateEmployeeInput,
        modified_by: Option<Uuid>,
    ) -> Result<Employee, DomainError> {
        let mut employee = self.get(id).await?;
        self.check_org(&input.division_id, &input.position_id).await?;

        let email = input.email.trim().to_lowercase();
        if email != employee.email {
            if let Some(existing) = self.employees.find_by_email(&email).await? {
                if existing.id != employee.id {
                    return Err(DomainError::EmailAlreadyExists(email));
                }
            }
        }

        employee.full_name = input.full_name.trim().to_string();
        employee.email = email;
        employee.phone = input.phone.map(|p| p.trim().to_string());
        employee.division_id = input.division_id;
        employee.position_id = input.position_id;
        employee.status = input.status;
        employee.modified_at = Some(Utc::now());
        employee.modified_by = modified_by;
        employee
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        self.employees.update(&employee).await
    }

    pub async fn delete(&self, id: &Uuid, deleted_by: Option<Uuid>) -> Result<(), DomainError> {
        let mut employee = self.get(id).await?;
        employee.soft_delete(deleted_by);
        self.employees.update(&employee).await?;
        info!(employee_id = %employee.id, "Employee deleted");
        Ok(())
    }

    async fn check_org(&self, division_id: &Uuid, position_id: &Uuid) -> Result<(), DomainError> {
        let division = self
            .divisions
            .find_by_id(division_id)
            .await?
            .ok_or(DomainError::DivisionNotFound)?;
        if !division.is_active {
            return Err(DomainError::DivisionNotFound);
        }

        let position = self
            .positions
            .find_by_id(position_id)
            .await?
            .ok_or(DomainError::PositionNotFound)?;
        if !position.is_active || position.division_id != division.id {
            return Err(DomainError::PositionNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Division, Position};
    use crate::repositories::{
        MockDivisionRepository, MockEmployeeRepository, MockPositionRepository,
    };

    fn org() -> (Division, Position) {
        let division = Division::new("Engineering".to_string(), None, None).unwrap();
        let position =
            Position::new(division.id, "Backend Engineer".to_string(), None, None).unwrap();
        (division, position)
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_number() {
        let (division, position) = org();

        let mut divisions = MockDivisionRepository::new();
        let division_clone = division.clone();
        divisions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(division_clone.clone())));

        let mut positions = MockPositionRepository::new();
        let position_clone = position.clone();
        positions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(position_clone.clone())));

        let existing = Employee::new(
            "EMP-0001".to_string(),
            "Budi Santoso".to_string(),
            "budi@example.com".to_string(),
            None,
            division.id,
            position.id,
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            None,
        )
        .unwrap();

        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_number()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(divisions),
            Arc::new(positions),
        );

        let result = service
            .create(
                CreateEmployeeInput {
                    employee_number: "EMP-0001".to_string(),
                    full_name: "Someone Else".to_string(),
                    email: "else@example.com".to_string(),
                    phone: None,
                    division_id: division.id,
                    position_id: position.id,
                    join_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                },
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(DomainError::EmployeeNumberAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_position_from_other_division() {
        let (division, _) = org();
        let other_division = Division::new("Finance".to_string(), None, None).unwrap();
        let foreign_position =
            Position::new(other_division.id, "Accountant".to_string(), None, None).unwrap();

        let mut divisions = MockDivisionRepository::new();
        let division_clone = division.clone();
        divisions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(division_clone.clone())));

        let mut positions = MockPositionRepository::new();
        let foreign_clone = foreign_position.clone();
        positions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(foreign_clone.clone())));

        let service = EmployeeService::new(
            Arc::new(MockEmployeeRepository::new()),
            Arc::new(divisions),
            Arc::new(positions),
        );

        let result = service
            .create(
                CreateEmployeeInput {
                    employee_number: "EMP-0009".to_string(),
                    full_name: "Rina Wulandari".to_string(),
                    email: "rina@example.com".to_string(),
                    phone: None,
                    division_id: division.id,
                    position_id: foreign_position.id,
                    join_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::PositionNotFound)));
    }

    #[tokio::test]
    async fn test_list_passes_clamped_page_to_repository() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_list_all()
            .withf(|page| page.page == 1 && page.per_page == 100)
            .returning(|_| Ok(vec![]));

        let service = EmployeeService::new(
            Arc::new(employees),
            Arc::new(MockDivisionRepository::new()),
            Arc::new(MockPositionRepository::new()),
        );

        let page = Pagination::clamped(Some(0), Some(1000));
        let result = service.list(&page).await.unwrap();
        assert!(result.is_empty());
    }
}
