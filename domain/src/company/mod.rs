//! Company domain: companies, employees and the entity store.

pub mod entities;
pub mod population;
pub mod store;

pub use entities::{Company, CompanyType, EXPERIENCE_PER_LEVEL, Employee, EmployeeRole};
pub use population::PopulationSeed;
pub use store::EntityStore;
