use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EmployeeError, EmployeeResult};
use crate::models::{Employee, NewEmployee};

/// Persistence contract for employees
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Store a new employee; storage assigns the id
    async fn create(&self, input: NewEmployee) -> EmployeeResult<Employee>;

    /// All employees, ordered by id ascending
    async fn find_all(&self) -> EmployeeResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i64) -> EmployeeResult<Option<Employee>>;

    async fn find_by_email(&self, email: &str) -> EmployeeResult<Option<Employee>>;

    /// Overwrite the row with `employee.id`.
    ///
    /// Fails with `NotFound` when no such row exists.
    async fn update(&self, employee: Employee) -> EmployeeResult<Employee>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> EmployeeResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    employees: BTreeMap<i64, Employee>,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.employees
            .values()
            .any(|e| e.email == email && Some(e.id) != except)
    }
}

/// In-memory implementation of EmployeeRepository (for development/testing).
///
/// Email uniqueness is checked under the write lock, matching the unique
/// index the Postgres table carries.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(&self, input: NewEmployee) -> EmployeeResult<Employee> {
        let mut store = self.store.write().await;

        if store.email_taken(&input.email, None) {
            return Err(EmployeeError::DuplicateEmail(input.email));
        }

        store.last_id += 1;
        let employee = Employee {
            id: store.last_id,
            name: input.name,
            lastname: input.lastname,
            email: input.email,
        };
        store.employees.insert(employee.id, employee.clone());

        tracing::info!(employee_id = employee.id, "Created employee");
        Ok(employee)
    }

    async fn find_all(&self) -> EmployeeResult<Vec<Employee>> {
        let store = self.store.read().await;
        Ok(store.employees.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> EmployeeResult<Option<Employee>> {
        let store = self.store.read().await;
        Ok(store.employees.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> EmployeeResult<Option<Employee>> {
        let store = self.store.read().await;
        Ok(store.employees.values().find(|e| e.email == email).cloned())
    }

    async fn update(&self, employee: Employee) -> EmployeeResult<Employee> {
        let mut store = self.store.write().await;

        if !store.employees.contains_key(&employee.id) {
            return Err(EmployeeError::NotFound(employee.id));
        }
        if store.email_taken(&employee.email, Some(employee.id)) {
            return Err(EmployeeError::DuplicateEmail(employee.email));
        }

        store.employees.insert(employee.id, employee.clone());

        tracing::info!(employee_id = employee.id, "Updated employee");
        Ok(employee)
    }

    async fn delete_by_id(&self, id: i64) -> EmployeeResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.employees.remove(&id).is_some();

        if removed {
            tracing::info!(employee_id = id, "Deleted employee");
        }
        Ok(removed)
    }
}
