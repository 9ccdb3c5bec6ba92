//! Campaign read model folded from indexed events.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

const TOP_CONTRIBUTORS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorTotal {
    pub address: String,
    /// Decimal string; contract amounts are `i128`.
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub total_raised: String,
    pub total_withdrawn: String,
    pub contributor_count: usize,
    pub contribution_count: usize,
    pub badges_awarded: usize,
    pub goal_reached: bool,
    /// Latest owner seen in an ownership transfer, if any.
    pub owner: Option<String>,
    pub top_contributors: Vec<ContributorTotal>,
}

/// Fold `events` (oldest first) into a [`CampaignSummary`].
pub fn summarize(events: &[EventRecord]) -> Result<CampaignSummary> {
    let mut per_contributor: HashMap<&str, i128> = HashMap::new();
    let mut total_raised: i128 = 0;
    let mut total_withdrawn: i128 = 0;
    let mut contribution_count = 0;
    let mut badges_awarded = 0;
    let mut goal_reached = false;
    let mut owner = None;

    for ev in events {
        match ev.kind() {
            EventKind::Contributed => {
                let amount = parse_amount(ev)?;
                total_raised = checked(total_raised.checked_add(amount), ev)?;
                if let Some(actor) = ev.actor.as_deref() {
                    let entry = per_contributor.entry(actor).or_insert(0);
                    *entry = checked(entry.checked_add(amount), ev)?;
                }
                contribution_count += 1;
            }
            EventKind::BadgeAwarded => badges_awarded += 1,
            EventKind::GoalReached => goal_reached = true,
            EventKind::FundsWithdrawn => {
                let amount = parse_amount(ev)?;
                total_withdrawn = checked(total_withdrawn.checked_add(amount), ev)?;
            }
            EventKind::OwnershipTransferred => owner = ev.actor.clone(),
            EventKind::Unknown => {}
        }
    }

    let mut ranked: Vec<(&str, i128)> = per_contributor.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let contributor_count = ranked.len();

    Ok(CampaignSummary {
        total_raised: total_raised.to_string(),
        total_withdrawn: total_withdrawn.to_string(),
        contributor_count,
        contribution_count,
        badges_awarded,
        goal_reached,
        owner,
        top_contributors: ranked
            .into_iter()
            .take(TOP_CONTRIBUTORS)
            .map(|(address, total)| ContributorTotal {
                address: address.to_string(),
                total: total.to_string(),
            })
            .collect(),
    })
}

fn parse_amount(ev: &EventRecord) -> Result<i128> {
    let raw = ev.amount.as_deref().ok_or_else(|| {
        IndexerError::EventParse(format!("event {} has no amount", ev.id))
    })?;
    raw.parse()
        .map_err(|_| IndexerError::EventParse(format!("event {} has invalid amount {raw}", ev.id)))
}

fn checked(value: Option<i128>, ev: &EventRecord) -> Result<i128> {
    value.ok_or_else(|| IndexerError::EventParse(format!("amount overflow at event {}", ev.id)))
}
