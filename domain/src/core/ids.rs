//! Identifier value objects.
//!
//! Companies and employees use readable sequential ids (`company-01`,
//! `employee-0001`) so that ordering and tie-breaks stay stable across runs.
//! Decisions and events use random UUIDs.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a company.
    CompanyId
);

string_id!(
    /// Identifier of an employee.
    EmployeeId
);

string_id!(
    /// Identifier of a decision.
    DecisionId
);

string_id!(
    /// Identifier of an event.
    EventId
);

impl CompanyId {
    /// Sequential company id, e.g. `company-03`.
    pub fn sequential(n: usize) -> Self {
        Self(format!("company-{:02}", n))
    }
}

impl EmployeeId {
    /// Sequential employee id, e.g. `employee-0042`.
    pub fn sequential(n: usize) -> Self {
        Self(format!("employee-{:04}", n))
    }
}

impl DecisionId {
    /// Generates a new random decision id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl EventId {
    /// Generates a new random event id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
