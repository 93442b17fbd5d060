//! In-memory entity store for companies and employees.
//!
//! Entities are never removed; deactivation flips `is_active` so that
//! decisions and events keep valid references.

use super::entities::{Company, CompanyType, Employee, EmployeeRole};
use crate::core::ids::{CompanyId, EmployeeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holds every company and employee of a simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    companies: BTreeMap<CompanyId, Company>,
    employees: BTreeMap<EmployeeId, Employee>,
    next_company: usize,
    next_employee: usize,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All companies, ordered by id
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    /// Active companies, ordered by id
    pub fn active_companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.values().filter(|c| c.is_active)
    }

    /// Employees, optionally restricted to one company
    pub fn employees<'a>(
        &'a self,
        company_id: Option<&'a CompanyId>,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees
            .values()
            .filter(move |e| company_id.is_none_or(|id| &e.company_id == id))
    }

    /// Active employees of a company, ordered by id
    pub fn active_employees<'a>(
        &'a self,
        company_id: &'a CompanyId,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees(Some(company_id)).filter(|e| e.is_active)
    }

    pub fn company(&self, id: &CompanyId) -> Option<&Company> {
        self.companies.get(id)
    }

    pub fn company_mut(&mut self, id: &CompanyId) -> Option<&mut Company> {
        self.companies.get_mut(id)
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.get_mut(id)
    }

    pub fn contains_company(&self, id: &CompanyId) -> bool {
        self.companies.contains_key(id)
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Found a new company and return its id
    pub fn found_company(&mut self, name: impl Into<String>, company_type: CompanyType) -> CompanyId {
        self.next_company += 1;
        let id = CompanyId::sequential(self.next_company);
        self.companies
            .insert(id.clone(), Company::new(id.clone(), name, company_type));
        id
    }

    /// Add an employee to a company, growing its headcount.
    ///
    /// Returns `None` when the company does not exist.
    pub fn hire(
        &mut self,
        company_id: &CompanyId,
        name: impl Into<String>,
        role: EmployeeRole,
        ai_personality: impl Into<String>,
        decision_style: impl Into<String>,
    ) -> Option<EmployeeId> {
        let company = self.companies.get_mut(company_id)?;
        company.size += 1;

        self.next_employee += 1;
        let id = EmployeeId::sequential(self.next_employee);
        let employee = Employee::new(id.clone(), company_id.clone(), name, role)
            .with_personality(ai_personality, decision_style);
        self.employees.insert(id.clone(), employee);
        Some(id)
    }

    /// Number of employees ever hired (used to derive display names)
    pub fn hired_total(&self) -> usize {
        self.next_employee
    }

    /// Deactivate a company together with its employees.
    ///
    /// Returns `false` when the company does not exist or was already inactive.
    pub fn deactivate_company(&mut self, id: &CompanyId) -> bool {
        let Some(company) = self.companies.get_mut(id) else {
            return false;
        };
        if !company.is_active {
            return false;
        }
        company.is_active = false;

        for employee in self.employees.values_mut() {
            if &employee.company_id == id {
                employee.is_active = false;
            }
        }
        true
    }
}
