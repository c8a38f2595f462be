use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::entity::{self, Column, Entity};
use crate::error::{EmployeeError, EmployeeResult};
use crate::models::{Employee, NewEmployee};
use crate::repository::EmployeeRepository;

/// PostgreSQL implementation of EmployeeRepository using SeaORM.
///
/// Email uniqueness is enforced by the `employees` unique index; a violation
/// surfaces as [`EmployeeError::DuplicateEmail`].
#[derive(Clone)]
pub struct PgEmployeeRepository {
    base: BaseRepository<Entity>,
}

impl PgEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }
}

fn map_db_err(e: DbErr) -> EmployeeError {
    EmployeeError::Internal(format!("Database error: {}", e))
}

/// Like [`map_db_err`], but a unique violation becomes `DuplicateEmail`
fn map_write_err(e: DbErr, email: String) -> EmployeeError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => EmployeeError::DuplicateEmail(email),
        _ => map_db_err(e),
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, input: NewEmployee) -> EmployeeResult<Employee> {
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| map_write_err(e, email))?;

        tracing::info!(employee_id = model.id, "Created employee");
        Ok(model.into())
    }

    async fn find_all(&self) -> EmployeeResult<Vec<Employee>> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> EmployeeResult<Option<Employee>> {
        let model = self.base.find_by_id(id).await.map_err(map_db_err)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> EmployeeResult<Option<Employee>> {
        let model = Entity::find()
            .filter(Column::Email.eq(email))
            .one(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, employee: Employee) -> EmployeeResult<Employee> {
        let id = employee.id;
        let email = employee.email.clone();
        let active_model: entity::ActiveModel = employee.into();

        let model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => EmployeeError::NotFound(id),
                other => map_write_err(other, email),
            })?;

        tracing::info!(employee_id = id, "Updated employee");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> EmployeeResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(map_db_err)?;

        if rows_affected > 0 {
            tracing::info!(employee_id = id, "Deleted employee");
        }
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    fn model(id: i64, name: &str, lastname: &str, email: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            lastname: lastname.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model(1, "Angel", "Hincho", "ahincho@unsa.edu.pe")]])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        let employee = repo
            .create(NewEmployee::new("Angel", "Hincho", "ahincho@unsa.edu.pe"))
            .await
            .unwrap();

        assert_eq!(employee.id, 1);
        assert_eq!(employee.email, "ahincho@unsa.edu.pe");
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                model(1, "Angel", "Hincho", "ahincho@unsa.edu.pe"),
                model(2, "Eduardo", "Jove", "angelhincho@gmail.com"),
            ]])
            .into_connection();
        let repo = PgEmployeeRepository::new(db.clone());

        let employees = repo.find_all().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1].name, "Eduardo");

        let log = db.into_transaction_log();
        assert_eq!(
            log,
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "employees"."id", "employees"."name", "employees"."lastname", "employees"."email" FROM "employees" ORDER BY "employees"."id" ASC"#,
                []
            )]
        );
    }

    #[tokio::test]
    async fn test_cloned_repository_shares_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model(5, "Angel", "Hincho", "ahincho@unsa.edu.pe")]])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);
        let cloned = repo.clone();
        drop(repo);

        let found = cloned.find_by_id(5).await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(5));
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        assert_eq!(repo.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_email_present() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model(3, "Angel", "Hincho", "ahincho@unsa.edu.pe")]])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        let found = repo.find_by_email("ahincho@unsa.edu.pe").await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(3));
    }

    #[tokio::test]
    async fn test_update_returns_new_values() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model(1, "Eduardo", "Jove", "angelhincho@gmail.com")]])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        let updated = repo
            .update(Employee {
                id: 1,
                name: "Eduardo".to_string(),
                lastname: "Jove".to_string(),
                email: "angelhincho@gmail.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.lastname, "Jove");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        let err = repo
            .update(Employee {
                id: 42,
                name: "n".to_string(),
                lastname: "l".to_string(),
                email: "e@x.io".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EmployeeError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgEmployeeRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, EmployeeError::Internal(msg) if msg.contains("connection reset")));
    }
}
