#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::CrowdfundingClient;

/// INV-1: `total_raised` equals the sum of every contributor's ledger entry.
/// `contributors` must list every address that ever contributed.
pub fn assert_total_matches_ledger(campaign: &CrowdfundingClient, contributors: &[Address]) {
    let sum: i128 = contributors
        .iter()
        .map(|who| campaign.contributions(who))
        .sum();
    assert_eq!(
        campaign.total_raised(),
        sum,
        "INV-1 violated: total_raised {} != sum of contributions {}",
        campaign.total_raised(),
        sum
    );
}

/// INV-2: a contributor's cumulative amount never decreases, and grows by
/// exactly the contributed amount.
pub fn assert_contribution_monotonic(before: i128, after: i128, amount: i128) {
    assert!(
        after >= before,
        "INV-2 violated: contribution decreased from {} to {}",
        before,
        after
    );
    assert_eq!(
        after,
        before + amount,
        "INV-2 violated: {} + {} != {}",
        before,
        amount,
        after
    );
}

/// INV-3: at most one badge per contributor.
pub fn assert_badge_at_most_one(balance: u32) {
    assert!(balance <= 1, "INV-3 violated: badge balance is {}", balance);
}

/// INV-4: nothing is ever withdrawn before the goal is reached.
///
/// Withdrawal releases the whole held balance, which includes any asset sent
/// to the contract outside `contribute`, so `total_withdrawn` may exceed
/// `total_raised`.
pub fn assert_withdrawal_gated(campaign: &CrowdfundingClient) {
    let withdrawn = campaign.total_withdrawn();
    if withdrawn > 0 {
        assert!(
            campaign.total_raised() >= campaign.funding_goal(),
            "INV-4 violated: {} withdrawn with goal unmet",
            withdrawn
        );
    }
}
