//! Company leaderboard
//!
//! | Component | Formula |
//! |-----------|---------|
//! | funds | `funds / 10000` |
//! | size | `active employees * 10` |
//! | activity | `5 * decisions among the 10 most recent` |
//! | quality | `avg experience * avg level * 20` (0 without employees) |
//!
//! The total is rounded to two decimals. Entries are sorted by total score
//! descending with ties broken by company id, and ranked from 1.

use crate::company::entities::CompanyType;
use crate::company::store::EntityStore;
use crate::core::ids::CompanyId;
use crate::decision::log::DecisionLog;
use crate::util::round2;
use serde::{Deserialize, Serialize};

/// Number of recent decisions that count toward activity
pub const ACTIVITY_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub company_id: CompanyId,
    pub company_name: String,
    pub company_type: CompanyType,
    pub is_active: bool,
    pub funds: i64,
    pub employees: usize,
    pub funds_score: f64,
    pub size_score: f64,
    pub activity_score: f64,
    pub quality_score: f64,
    pub total_score: f64,
}

/// Rank every company in the store
pub fn compute_leaderboard(store: &EntityStore, decisions: &DecisionLog) -> Vec<LeaderboardEntry> {
    let recent = decisions.recent(ACTIVITY_WINDOW, None);

    let mut entries: Vec<LeaderboardEntry> = store
        .companies()
        .map(|company| {
            let employees: Vec<_> = store.active_employees(&company.id).collect();
            let count = employees.len();

            let quality_score = if count == 0 {
                0.0
            } else {
                let avg_experience = employees.iter().map(|e| e.experience).sum::<f64>() / count as f64;
                let avg_level = employees.iter().map(|e| e.level as f64).sum::<f64>() / count as f64;
                avg_experience * avg_level * 20.0
            };

            let activity = recent.iter().filter(|d| d.company_id == company.id).count();

            let funds_score = company.funds as f64 / 10_000.0;
            let size_score = count as f64 * 10.0;
            let activity_score = activity as f64 * 5.0;
            let total = funds_score + size_score + activity_score + quality_score;

            LeaderboardEntry {
                rank: 0,
                company_id: company.id.clone(),
                company_name: company.name.clone(),
                company_type: company.company_type,
                is_active: company.is_active,
                funds: company.funds,
                employees: count,
                funds_score,
                size_score,
                activity_score,
                quality_score,
                total_score: round2(total),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then_with(|| a.company_id.cmp(&b.company_id))
    });

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    entries
}
