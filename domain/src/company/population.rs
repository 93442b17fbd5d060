//! Baseline population seeding.
//!
//! A reset always re-seeds the same deterministic population so that runs
//! are comparable.

use super::entities::{CompanyType, EmployeeRole};
use super::store::EntityStore;
use crate::core::ids::{CompanyId, EmployeeId};

const COMPANY_NAMES: &[&str] = &[
    "Nimbus Labs",
    "Ironclad Holdings",
    "Brightpath Advisory",
    "Forge & Gear Works",
    "Quantum Sprout",
    "Meridian Group",
    "Keystone Partners",
    "Atlas Fabrication",
    "Lumen Dynamics",
    "Northwind Capital",
    "Cobalt Insight",
    "Granite Industries",
    "Velocity Ventures",
    "Harbor Systems",
    "Summit Consulting",
    "Anvil Manufacturing",
    "Pixel Orchard",
    "Crescent Corp",
    "Signal Strategy",
    "Steelbridge Co.",
];

const FIRST_NAMES: &[&str] = &[
    "Ava", "Liam", "Maya", "Noah", "Iris", "Owen", "Zara", "Eli", "Nora", "Kai", "Lena", "Theo",
    "Ruth", "Jun", "Mila", "Omar",
];

const LAST_NAMES: &[&str] = &[
    "Chen", "Okafor", "Silva", "Novak", "Haddad", "Larsen", "Ito", "Moreau", "Kaur", "Reyes",
    "Petrov", "Adeyemi", "Walsh",
];

/// AI personality tags handed out round-robin
pub const PERSONALITIES: &[&str] = &[
    "analytical",
    "visionary",
    "cautious",
    "aggressive",
    "collaborative",
];

/// Decision style tags handed out round-robin
pub const DECISION_STYLES: &[&str] = &["data-driven", "intuitive", "consensus", "decisive"];

/// Deterministic display name for the n-th employee ever hired
pub fn employee_name(n: usize) -> String {
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last = LAST_NAMES[(n / FIRST_NAMES.len() + n) % LAST_NAMES.len()];
    format!("{} {}", first, last)
}

/// Personality and decision style for the n-th employee ever hired
pub fn employee_traits(n: usize) -> (&'static str, &'static str) {
    (
        PERSONALITIES[n % PERSONALITIES.len()],
        DECISION_STYLES[(n / PERSONALITIES.len() + n) % DECISION_STYLES.len()],
    )
}

/// Describes the baseline population created at reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSeed {
    /// Number of companies to found
    pub companies: usize,
}

impl PopulationSeed {
    pub fn new(companies: usize) -> Self {
        Self { companies }
    }

    /// Build a fresh entity store with the baseline population
    pub fn build(&self) -> EntityStore {
        let mut store = EntityStore::new();
        let types = CompanyType::all();

        for i in 0..self.companies {
            let company_type = types[i % types.len()];
            let name = COMPANY_NAMES[i % COMPANY_NAMES.len()];
            let company_id = store.found_company(name, company_type);

            for &role in company_type.founding_roles() {
                hire_next(&mut store, &company_id, role);
            }
        }

        store
    }
}

/// Hire one employee with deterministic name and traits
pub fn hire_next(
    store: &mut EntityStore,
    company_id: &CompanyId,
    role: EmployeeRole,
) -> Option<EmployeeId> {
    let n = store.hired_total();
    let (personality, style) = employee_traits(n);
    store.hire(company_id, employee_name(n), role, personality, style)
}
