use crate::models::{Employee, NewEmployee};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

/// Sea-ORM entity for the `employees` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub lastname: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// OpenAPI tag for the employee endpoints
    pub const TAG: &'static str = "employees";
    /// Mount point under `/api`
    pub const URL: &'static str = "/employee";
}

impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            lastname: model.lastname,
            email: model.email,
        }
    }
}

// id is left to the BIGSERIAL default
impl From<NewEmployee> for ActiveModel {
    fn from(input: NewEmployee) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            lastname: Set(input.lastname),
            email: Set(input.email),
        }
    }
}

// Full overwrite of the row identified by `employee.id`
impl From<Employee> for ActiveModel {
    fn from(employee: Employee) -> Self {
        ActiveModel {
            id: Unchanged(employee.id),
            name: Set(employee.name),
            lastname: Set(employee.lastname),
            email: Set(employee.email),
        }
    }
}
