//! Counters for employee record operations.

use metrics::{counter, histogram};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeOperation {
    Create,
    List,
    Get,
    Update,
    Patch,
    Delete,
}

impl EmployeeOperation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Success,
    NotFound,
    /// Rejected because the email is already taken
    Duplicate,
    Error,
}

impl OperationOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::Error => "error",
        }
    }
}

pub struct EmployeeMetrics;

impl EmployeeMetrics {
    pub fn record(operation: EmployeeOperation, outcome: OperationOutcome) {
        counter!(
            "employee_operations_total",
            "operation" => operation.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
    }

    pub fn record_duration(operation: EmployeeOperation, duration: Duration) {
        histogram!(
            "employee_operation_duration_seconds",
            "operation" => operation.as_str()
        )
        .record(duration.as_secs_f64());
    }
}
