//! Company and employee entities

use crate::core::ids::{CompanyId, EmployeeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of company (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    Startup,
    Enterprise,
    Consulting,
    Manufacturing,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Startup => "startup",
            CompanyType::Enterprise => "enterprise",
            CompanyType::Consulting => "consulting",
            CompanyType::Manufacturing => "manufacturing",
        }
    }

    /// All company types, in seeding order
    pub fn all() -> [CompanyType; 4] {
        [
            CompanyType::Startup,
            CompanyType::Enterprise,
            CompanyType::Consulting,
            CompanyType::Manufacturing,
        ]
    }

    /// Starting funds for a freshly founded company of this type
    pub fn starting_funds(&self) -> i64 {
        match self {
            CompanyType::Startup => 50_000,
            CompanyType::Enterprise => 250_000,
            CompanyType::Consulting => 100_000,
            CompanyType::Manufacturing => 150_000,
        }
    }

    /// Initial org chart for a company of this type
    pub fn founding_roles(&self) -> &'static [EmployeeRole] {
        match self {
            CompanyType::Startup => &[EmployeeRole::Ceo, EmployeeRole::Cto, EmployeeRole::Engineer],
            CompanyType::Enterprise => &[
                EmployeeRole::Ceo,
                EmployeeRole::Cto,
                EmployeeRole::Manager,
                EmployeeRole::Engineer,
                EmployeeRole::Analyst,
                EmployeeRole::Sales,
            ],
            CompanyType::Consulting => &[
                EmployeeRole::Ceo,
                EmployeeRole::Manager,
                EmployeeRole::Analyst,
                EmployeeRole::Sales,
            ],
            CompanyType::Manufacturing => &[
                EmployeeRole::Ceo,
                EmployeeRole::Manager,
                EmployeeRole::Engineer,
                EmployeeRole::Engineer,
                EmployeeRole::Sales,
            ],
        }
    }

    /// Role hired when a hiring decision is approved
    pub fn next_hire(&self, headcount: u32) -> EmployeeRole {
        let pool: &[EmployeeRole] = match self {
            CompanyType::Startup => &[EmployeeRole::Engineer, EmployeeRole::Sales],
            CompanyType::Enterprise => &[
                EmployeeRole::Engineer,
                EmployeeRole::Analyst,
                EmployeeRole::Manager,
            ],
            CompanyType::Consulting => &[EmployeeRole::Analyst, EmployeeRole::Sales],
            CompanyType::Manufacturing => &[EmployeeRole::Engineer, EmployeeRole::Manager],
        };
        pool[headcount as usize % pool.len()]
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an employee within a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Ceo,
    Cto,
    Manager,
    Engineer,
    Analyst,
    Sales,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Ceo => "ceo",
            EmployeeRole::Cto => "cto",
            EmployeeRole::Manager => "manager",
            EmployeeRole::Engineer => "engineer",
            EmployeeRole::Analyst => "analyst",
            EmployeeRole::Sales => "sales",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EmployeeRole::Ceo => "CEO",
            EmployeeRole::Cto => "CTO",
            EmployeeRole::Manager => "Manager",
            EmployeeRole::Engineer => "Engineer",
            EmployeeRole::Analyst => "Analyst",
            EmployeeRole::Sales => "Sales",
        }
    }

    /// Starting level for a founding employee in this role
    pub fn starting_level(&self) -> u32 {
        match self {
            EmployeeRole::Ceo => 5,
            EmployeeRole::Cto => 4,
            EmployeeRole::Manager => 3,
            _ => 1,
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated company (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub company_type: CompanyType,
    /// Available funds; never negative
    pub funds: i64,
    /// Headcount
    pub size: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(id: CompanyId, name: impl Into<String>, company_type: CompanyType) -> Self {
        Self {
            id,
            name: name.into(),
            company_type,
            funds: company_type.starting_funds(),
            size: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Apply a signed change to funds, saturating at zero.
    ///
    /// Returns the delta actually applied.
    pub fn adjust_funds(&mut self, delta: i64) -> i64 {
        let before = self.funds;
        self.funds = self.funds.saturating_add(delta).max(0);
        self.funds - before
    }

    pub fn is_bankrupt(&self) -> bool {
        self.funds == 0
    }
}

/// An employee of a company (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Back-reference to the owning company
    pub company_id: CompanyId,
    pub name: String,
    pub role: EmployeeRole,
    /// Seniority, starting at 1
    pub level: u32,
    /// Cumulative experience
    pub experience: f64,
    pub ai_personality: String,
    pub decision_style: String,
    pub is_active: bool,
}

/// Experience points needed per level step
pub const EXPERIENCE_PER_LEVEL: f64 = 10.0;

impl Employee {
    pub fn new(
        id: EmployeeId,
        company_id: CompanyId,
        name: impl Into<String>,
        role: EmployeeRole,
    ) -> Self {
        Self {
            id,
            company_id,
            name: name.into(),
            role,
            level: role.starting_level(),
            experience: 0.0,
            ai_personality: String::new(),
            decision_style: String::new(),
            is_active: true,
        }
    }

    pub fn with_personality(
        mut self,
        ai_personality: impl Into<String>,
        decision_style: impl Into<String>,
    ) -> Self {
        self.ai_personality = ai_personality.into();
        self.decision_style = decision_style.into();
        self
    }

    /// Add experience and promote when a level threshold is crossed.
    ///
    /// Returns `true` when the employee was promoted.
    pub fn gain_experience(&mut self, amount: f64) -> bool {
        let before = (self.experience / EXPERIENCE_PER_LEVEL).floor();
        self.experience += amount.max(0.0);
        let after = (self.experience / EXPERIENCE_PER_LEVEL).floor();
        if after > before {
            self.level += (after - before) as u32;
            true
        } else {
            false
        }
    }
}
