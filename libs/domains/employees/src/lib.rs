//! Employees Domain
//!
//! CRUD over employee records with one business rule: no two employees share
//! an email address.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Email uniqueness, patch merge
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Employee, NewEmployee, UpdateEmployee
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_employees::{
//!     handlers,
//!     repository::InMemoryEmployeeRepository,
//!     service::EmployeeService,
//! };
//!
//! let repository = InMemoryEmployeeRepository::new();
//! let service = EmployeeService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{EmployeeError, EmployeeResult};
pub use handlers::ApiDoc;
pub use models::{Employee, NewEmployee, UpdateEmployee};
pub use postgres::PgEmployeeRepository;
pub use repository::{EmployeeRepository, InMemoryEmployeeRepository};
pub use service::EmployeeService;
