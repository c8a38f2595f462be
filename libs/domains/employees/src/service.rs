use std::sync::Arc;

use crate::error::{EmployeeError, EmployeeResult};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::repository::EmployeeRepository;

/// Service layer for employee business logic.
///
/// The only rule enforced here is email uniqueness on create; everything else
/// is delegated to the repository.
#[derive(Clone)]
pub struct EmployeeService<R: EmployeeRepository> {
    repository: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an employee unless the email is already taken.
    ///
    /// The lookup fails fast without writing. Concurrent creates that both
    /// pass it are still stopped by the storage uniqueness check.
    pub async fn create_employee(&self, input: NewEmployee) -> EmployeeResult<Employee> {
        if self.repository.find_by_email(&input.email).await?.is_some() {
            tracing::warn!(email = %input.email, "Rejected duplicate employee");
            return Err(EmployeeError::DuplicateEmail(input.email));
        }

        self.repository.create(input).await
    }

    pub async fn list_employees(&self) -> EmployeeResult<Vec<Employee>> {
        self.repository.find_all().await
    }

    /// Absence is `Ok(None)`, not an error
    pub async fn get_employee(&self, id: i64) -> EmployeeResult<Option<Employee>> {
        self.repository.find_by_id(id).await
    }

    /// Persist `employee` as given; callers merge fields beforehand
    pub async fn update_employee(&self, employee: Employee) -> EmployeeResult<Employee> {
        self.repository.update(employee).await
    }

    /// Apply the present fields of `patch` to employee `id`.
    ///
    /// Returns `Ok(None)` without writing when the employee does not exist.
    pub async fn patch_employee(
        &self,
        id: i64,
        patch: UpdateEmployee,
    ) -> EmployeeResult<Option<Employee>> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let merged = existing.merge(patch);
        self.repository.update(merged).await.map(Some)
    }

    /// Remove employee `id`; a missing id is not an error
    pub async fn delete_employee(&self, id: i64) -> EmployeeResult<()> {
        let removed = self.repository.delete_by_id(id).await?;
        if !removed {
            tracing::debug!(employee_id = id, "Delete requested for missing employee");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEmployeeRepository;
    use mockall::predicate::eq;

    fn angel(id: i64) -> Employee {
        Employee {
            id,
            name: "Angel".to_string(),
            lastname: "Hincho".to_string(),
            email: "ahincho@unsa.edu.pe".to_string(),
        }
    }

    fn angel_input() -> NewEmployee {
        NewEmployee::new("Angel", "Hincho", "ahincho@unsa.edu.pe")
    }

    #[tokio::test]
    async fn test_create_employee_with_fresh_email() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ahincho@unsa.edu.pe")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .with(eq(angel_input()))
            .times(1)
            .returning(|_| Ok(angel(1)));

        let service = EmployeeService::new(repo);
        let created = service.create_employee(angel_input()).await.unwrap();

        assert_eq!(created, angel(1));
    }

    #[tokio::test]
    async fn test_create_employee_duplicate_email_does_not_write() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(angel(1))));
        repo.expect_create().never();

        let service = EmployeeService::new(repo);
        let err = service.create_employee(angel_input()).await.unwrap_err();

        assert!(matches!(err, EmployeeError::DuplicateEmail(ref email) if email == "ahincho@unsa.edu.pe"));
        assert_eq!(err.to_string(), "The employee is already saved: ahincho@unsa.edu.pe");
    }

    #[tokio::test]
    async fn test_create_employee_storage_conflict_is_propagated() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|input| Err(EmployeeError::DuplicateEmail(input.email)));

        let service = EmployeeService::new(repo);
        let err = service.create_employee(angel_input()).await.unwrap_err();

        assert!(matches!(err, EmployeeError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_list_employees_empty() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_all().times(1).returning(|| Ok(vec![]));

        let service = EmployeeService::new(repo);
        assert!(service.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_employee_absent_is_none() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(None));

        let service = EmployeeService::new(repo);
        assert_eq!(service.get_employee(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_employee_passes_through() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_update()
            .with(eq(angel(3)))
            .times(1)
            .returning(Ok);

        let service = EmployeeService::new(repo);
        assert_eq!(service.update_employee(angel(3)).await.unwrap(), angel(3));
    }

    #[tokio::test]
    async fn test_patch_employee_merges_fields() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(angel(id))));
        repo.expect_update()
            .withf(|e| e.id == 1 && e.name == "Angel" && e.email == "angelhincho@gmail.com")
            .times(1)
            .returning(Ok);

        let service = EmployeeService::new(repo);
        let patched = service
            .patch_employee(
                1,
                UpdateEmployee {
                    email: Some("angelhincho@gmail.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(patched.lastname, "Hincho");
        assert_eq!(patched.email, "angelhincho@gmail.com");
    }

    #[tokio::test]
    async fn test_patch_employee_missing_does_not_write() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = EmployeeService::new(repo);
        let result = service
            .patch_employee(
                9,
                UpdateEmployee {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_patch_employee_empty_patch_skips_write() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(angel(id))));
        repo.expect_update().never();

        let service = EmployeeService::new(repo);
        let result = service
            .patch_employee(1, UpdateEmployee::default())
            .await
            .unwrap();

        assert_eq!(result, Some(angel(1)));
    }

    #[tokio::test]
    async fn test_delete_employee_missing_is_noop() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete_by_id()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(false));

        let service = EmployeeService::new(repo);
        assert!(service.delete_employee(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_all()
            .returning(|| Err(EmployeeError::Internal("Database error: down".to_string())));

        let service = EmployeeService::new(repo);
        assert!(matches!(
            service.list_employees().await,
            Err(EmployeeError::Internal(_))
        ));
    }
}
