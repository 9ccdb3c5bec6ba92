extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, Symbol, TryFromVal, TryIntoVal, Val, Vec,
};

use crowd_badge::{CrowdBadge, CrowdBadgeClient};
use crowd_token::{CrowdToken, CrowdTokenClient};

use crate::events::{BadgeAwarded, Contributed, FundsWithdrawn, GoalReached, OwnershipTransferred};
use crate::{Crowdfunding, CrowdfundingClient};

const UNIT: i128 = 10_000_000;

fn setup() -> (Env, CrowdfundingClient<'static>, Address, token::StellarAssetClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let credits_id = env.register(CrowdToken, (owner.clone(),));
    let badges_id = env.register(CrowdBadge, (owner.clone(),));
    let campaign_id = env.register(
        Crowdfunding,
        (
            owner.clone(),
            sac.address(),
            5 * UNIT,
            UNIT,
            1_000i128,
            credits_id.clone(),
            badges_id.clone(),
        ),
    );
    CrowdTokenClient::new(&env, &credits_id).set_minter(&campaign_id);
    CrowdBadgeClient::new(&env, &badges_id).set_minter(&campaign_id);

    let client = CrowdfundingClient::new(&env, &campaign_id);
    let asset_admin = token::StellarAssetClient::new(&env, &sac.address());
    (env, client, owner, asset_admin)
}

/// Most recent event published by `contract` whose first topic is `name`.
fn find_event(env: &Env, contract: &Address, name: Symbol) -> Option<(Vec<Val>, Val)> {
    let mut found = None;
    for (emitter, topics, data) in env.events().all().iter() {
        if &emitter != contract {
            continue;
        }
        let Some(first) = topics.get(0) else { continue };
        if Symbol::try_from_val(env, &first).ok() == Some(name.clone()) {
            found = Some((topics, data));
        }
    }
    found
}

#[test]
fn test_contributed_event() {
    let (env, client, _owner, asset_admin) = setup();
    let user = Address::generate(&env);
    asset_admin.mint(&user, &(10 * UNIT));

    client.contribute(&user, &(2 * UNIT));

    let (topics, data) =
        find_event(&env, &client.address, symbol_short!("contrib")).expect("No contrib event");
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        user.into_val(&env),
    ];
    assert_eq!(topics, expected_topics);

    let event: Contributed = data.try_into_val(&env).unwrap();
    assert_eq!(
        event,
        Contributed {
            contributor: user.clone(),
            amount: 2 * UNIT,
            cumulative: 2 * UNIT,
            total_raised: 2 * UNIT,
            credits: 2 * UNIT * 1_000,
        }
    );
}

#[test]
fn test_badge_event_only_when_minted() {
    let (env, client, _owner, asset_admin) = setup();
    let small = Address::generate(&env);
    asset_admin.mint(&small, &UNIT);

    client.contribute(&small, &(UNIT / 2));
    assert!(find_event(&env, &client.address, symbol_short!("badge")).is_none());

    let big = Address::generate(&env);
    asset_admin.mint(&big, &(3 * UNIT));
    client.contribute(&big, &(3 * UNIT / 2));

    let (_, data) =
        find_event(&env, &client.address, symbol_short!("badge")).expect("No badge event");
    let event: BadgeAwarded = data.try_into_val(&env).unwrap();
    assert_eq!(
        event,
        BadgeAwarded {
            contributor: big,
            amount: 3 * UNIT / 2,
        }
    );
}

#[test]
fn test_goal_reached_event_on_crossing() {
    let (env, client, _owner, asset_admin) = setup();
    let user = Address::generate(&env);
    asset_admin.mint(&user, &(10 * UNIT));

    client.contribute(&user, &(3 * UNIT));
    assert!(find_event(&env, &client.address, symbol_short!("goal_met")).is_none());

    client.contribute(&user, &(3 * UNIT));
    let (_, data) =
        find_event(&env, &client.address, symbol_short!("goal_met")).expect("No goal_met event");
    let event: GoalReached = data.try_into_val(&env).unwrap();
    assert_eq!(
        event,
        GoalReached {
            total_raised: 6 * UNIT,
            funding_goal: 5 * UNIT,
        }
    );
}

#[test]
fn test_withdrawn_event() {
    let (env, client, owner, asset_admin) = setup();
    let user = Address::generate(&env);
    asset_admin.mint(&user, &(10 * UNIT));
    client.contribute(&user, &(6 * UNIT));

    client.withdraw_funds(&owner);

    let (topics, data) =
        find_event(&env, &client.address, symbol_short!("withdrawn")).expect("No withdrawn event");
    let expected_topics = vec![
        &env,
        symbol_short!("withdrawn").into_val(&env),
        owner.into_val(&env),
    ];
    assert_eq!(topics, expected_topics);

    let event: FundsWithdrawn = data.try_into_val(&env).unwrap();
    assert_eq!(
        event,
        FundsWithdrawn {
            owner: owner.clone(),
            amount: 6 * UNIT,
            total_raised: 6 * UNIT,
        }
    );
}

#[test]
fn test_ownership_transferred_event() {
    let (env, client, owner, _asset_admin) = setup();
    let new_owner = Address::generate(&env);

    client.transfer_ownership(&owner, &new_owner);

    let (_, data) =
        find_event(&env, &client.address, symbol_short!("owner_set")).expect("No owner_set event");
    let event: OwnershipTransferred = data.try_into_val(&env).unwrap();
    assert_eq!(
        event,
        OwnershipTransferred {
            previous: owner,
            new_owner,
        }
    );
}
