use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    /// Assigned by storage on creation, never changes afterwards
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Angel")]
    pub name: String,
    #[schema(example = "Hincho")]
    pub lastname: String,
    /// Unique across all employees
    #[schema(example = "ahincho@unsa.edu.pe")]
    pub email: String,
}

impl Employee {
    /// Overwrite the mutable fields, keeping `id`
    pub fn replace_fields(&mut self, input: NewEmployee) {
        self.name = input.name;
        self.lastname = input.lastname;
        self.email = input.email;
    }

    /// Apply only the fields present in `patch`
    pub fn merge(mut self, patch: UpdateEmployee) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(lastname) = patch.lastname {
            self.lastname = lastname;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        self
    }
}

/// Body for `POST` and `PUT`.
///
/// Any `id` in the JSON is ignored. Values are stored as given; empty strings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "Angel")]
    pub name: String,
    #[schema(example = "Hincho")]
    pub lastname: String,
    #[schema(example = "ahincho@unsa.edu.pe")]
    pub email: String,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
        }
    }
}

/// Body for `PATCH`: absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub lastname: Option<String>,
    #[schema(example = "angelhincho@gmail.com")]
    pub email: Option<String>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.lastname.is_none() && self.email.is_none()
    }
}
