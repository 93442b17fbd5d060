//! Prompt templates for employee decision requests

use crate::company::entities::{Company, Employee};
use crate::decision::entities::DecisionType;

/// Templates for the prompts sent to the AI decision client
pub struct DecisionPromptTemplate;

impl DecisionPromptTemplate {
    /// System prompt establishing the employee persona
    pub fn system(employee: &Employee) -> String {
        format!(
            r#"You are {name}, a level {level} {role} with a {personality} personality.
You make decisions in a {style} way.
You are voting on a business decision for your company.
Answer with APPROVE or REJECT, a short rationale, and a confidence between 0 and 1."#,
            name = employee.name,
            level = employee.level,
            role = employee.role.display_name(),
            personality = employee.ai_personality,
            style = employee.decision_style,
        )
    }

    /// Company context shared by every voter
    pub fn company_context(company: &Company, headcount: usize) -> String {
        format!(
            "{} ({}) has {} in funds and {} active employees.",
            company.name, company.company_type, company.funds, headcount
        )
    }

    /// The decision question for one round
    pub fn decision_prompt(decision_type: DecisionType, context: &str, round: u64) -> String {
        format!(
            r#"Round {round}. {context}

Proposed decision: {question}

Should the company go ahead? Respond as JSON:
{{"vote": "for" | "against" | "abstain", "confidence": 0.0-1.0, "reasoning": "..."}}"#,
            question = Self::question(decision_type),
        )
    }

    fn question(decision_type: DecisionType) -> &'static str {
        match decision_type {
            DecisionType::Strategic => "Commit to a new strategic direction for the next quarter.",
            DecisionType::Hiring => "Hire one additional employee.",
            DecisionType::Investment => "Invest reserves in a growth opportunity.",
            DecisionType::Product => "Ship a new product feature.",
            DecisionType::Marketing => "Launch a marketing campaign.",
            DecisionType::CostCutting => "Cut operating costs this round.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::entities::{CompanyType, EmployeeRole};
    use crate::core::ids::{CompanyId, EmployeeId};

    #[test]
    fn test_system_prompt_carries_persona() {
        let employee = Employee::new(
            EmployeeId::sequential(1),
            CompanyId::sequential(1),
            "Ava Chen",
            EmployeeRole::Cto,
        )
        .with_personality("visionary", "intuitive");

        let prompt = DecisionPromptTemplate::system(&employee);
        assert!(prompt.contains("Ava Chen"));
        assert!(prompt.contains("CTO"));
        assert!(prompt.contains("visionary"));
        assert!(prompt.contains("intuitive"));
    }

    #[test]
    fn test_decision_prompt_mentions_round_and_context() {
        let company = Company::new(CompanyId::sequential(1), "Acme", CompanyType::Startup);
        let context = DecisionPromptTemplate::company_context(&company, 3);
        let prompt = DecisionPromptTemplate::decision_prompt(DecisionType::Hiring, &context, 7);

        assert!(prompt.contains("Round 7"));
        assert!(prompt.contains("Acme (startup)"));
        assert!(prompt.contains("Hire one additional employee"));
    }
}
