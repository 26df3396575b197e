mod common;

use polecat_clubs::membership::{self, Transfer};
use polecat_common::error::PolecatError;
use polecat_common::models::ApplicationStatus;
use polecat_common::role::Role;
use polecat_db::repository::{applications, memberships};
use uuid::Uuid;

use common::{club, join, setup, user};

#[tokio::test]
async fn officer_promotes_member() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let officer = user(&pool, "officer").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &officer, Role::Officer).await;
    join(&pool, &owner, c, &alice, Role::Member).await;

    membership::promote(&pool, officer.id, c, alice.id).await.unwrap();

    assert_eq!(
        memberships::role_of(&pool, alice.id, c).await.unwrap(),
        Some(Role::Officer)
    );
}

#[tokio::test]
async fn member_cannot_promote() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let m = user(&pool, "mallory").await;
    let other = user(&pool, "other").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &m, Role::Member).await;
    join(&pool, &owner, c, &other, Role::Member).await;

    let err = membership::promote(&pool, m.id, c, other.id).await.unwrap_err();

    assert!(matches!(err, PolecatError::Forbidden { .. }));
    assert_eq!(
        memberships::role_of(&pool, other.id, c).await.unwrap(),
        Some(Role::Member)
    );
}

#[tokio::test]
async fn promoting_an_officer_is_a_no_op() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let officer = user(&pool, "officer").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &officer, Role::Officer).await;

    let err = membership::promote(&pool, owner.id, c, officer.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));

    let err = membership::promote(&pool, owner.id, c, owner.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
    assert_eq!(
        memberships::role_of(&pool, owner.id, c).await.unwrap(),
        Some(Role::Owner)
    );
}

#[tokio::test]
async fn only_owner_demotes_officers() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let a = user(&pool, "officer_a").await;
    let b = user(&pool, "officer_b").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &a, Role::Officer).await;
    join(&pool, &owner, c, &b, Role::Officer).await;

    let err = membership::demote(&pool, a.id, c, b.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));

    membership::demote(&pool, owner.id, c, b.id).await.unwrap();
    assert_eq!(
        memberships::role_of(&pool, b.id, c).await.unwrap(),
        Some(Role::Member)
    );

    // b is a plain member now
    let err = membership::demote(&pool, owner.id, c, b.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
}

#[tokio::test]
async fn officer_removes_member_and_retires_application() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let officer = user(&pool, "officer").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &officer, Role::Officer).await;
    join(&pool, &owner, c, &alice, Role::Member).await;

    membership::remove(&pool, officer.id, c, alice.id).await.unwrap();

    assert_eq!(memberships::role_of(&pool, alice.id, c).await.unwrap(), None);
    let accepted = applications::count_with_status(&pool, alice.id, c, ApplicationStatus::Accepted)
        .await
        .unwrap();
    let rejected = applications::count_with_status(&pool, alice.id, c, ApplicationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!((accepted, rejected), (0, 1));
}

#[tokio::test]
async fn removal_needs_strictly_higher_rank() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let a = user(&pool, "officer_a").await;
    let b = user(&pool, "officer_b").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &a, Role::Officer).await;
    join(&pool, &owner, c, &b, Role::Officer).await;

    for (actor, target) in [(a.id, b.id), (a.id, owner.id), (owner.id, owner.id), (a.id, a.id)] {
        let err = membership::remove(&pool, actor, c, target).await.unwrap_err();
        assert!(matches!(err, PolecatError::Forbidden { .. }), "{actor} -> {target}");
    }

    membership::remove(&pool, owner.id, c, b.id).await.unwrap();
    assert_eq!(memberships::count_members(&pool, c).await.unwrap(), 2);
}

#[tokio::test]
async fn transfer_swaps_owner_and_officer() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &alice, Role::Member).await;

    let result = membership::transfer_ownership(&pool, owner.id, c, alice.id).await.unwrap();

    assert_eq!(result, Transfer::Transferred);
    assert_eq!(
        memberships::role_of(&pool, alice.id, c).await.unwrap(),
        Some(Role::Owner)
    );
    assert_eq!(
        memberships::role_of(&pool, owner.id, c).await.unwrap(),
        Some(Role::Officer)
    );
    assert_eq!(memberships::find_owner(&pool, c).await.unwrap(), Some(alice.id));
}

#[tokio::test]
async fn transfer_to_self_changes_nothing() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &alice, Role::Officer).await;

    for _ in 0..2 {
        let result = membership::transfer_ownership(&pool, owner.id, c, owner.id).await.unwrap();
        assert_eq!(result, Transfer::AlreadyOwner);
    }

    assert_eq!(
        memberships::role_of(&pool, owner.id, c).await.unwrap(),
        Some(Role::Owner)
    );
    assert_eq!(
        memberships::role_of(&pool, alice.id, c).await.unwrap(),
        Some(Role::Officer)
    );
}

#[tokio::test]
async fn transfer_to_non_member_rolls_back() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let stranger = user(&pool, "stranger").await;
    let c = club(&pool, &owner, "Knights").await;

    let err = membership::transfer_ownership(&pool, owner.id, c, stranger.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));
    assert_eq!(memberships::find_owner(&pool, c).await.unwrap(), Some(owner.id));

    let err = membership::transfer_ownership(&pool, stranger.id, c, owner.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));
}

#[tokio::test]
async fn owner_cannot_leave_but_members_can() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &alice, Role::Officer).await;

    let err = membership::leave(&pool, owner.id, c).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
    assert_eq!(memberships::find_owner(&pool, c).await.unwrap(), Some(owner.id));

    membership::leave(&pool, alice.id, c).await.unwrap();
    assert_eq!(memberships::role_of(&pool, alice.id, c).await.unwrap(), None);
    assert_eq!(
        applications::count_with_status(&pool, alice.id, c, ApplicationStatus::Accepted)
            .await
            .unwrap(),
        0
    );

    let err = membership::leave(&pool, alice.id, c).await.unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));
}

#[tokio::test]
async fn unknown_club_is_not_found() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;

    let err = membership::promote(&pool, owner.id, Uuid::now_v7(), owner.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));
}

#[tokio::test]
async fn demoted_actor_loses_rights_immediately() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let officer = user(&pool, "officer").await;
    let alice = user(&pool, "alice").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &officer, Role::Officer).await;
    join(&pool, &owner, c, &alice, Role::Member).await;

    membership::demote(&pool, owner.id, c, officer.id).await.unwrap();

    let err = membership::promote(&pool, officer.id, c, alice.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));
}

#[tokio::test]
async fn schema_rejects_second_membership_and_second_owner() {
    use polecat_db::constraint::{classify, Violation};

    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let alice = user(&pool, "alice").await;
    let bob = user(&pool, "bob").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &alice, Role::Member).await;

    let err = memberships::add_member(&pool, alice.id, c, Role::Member)
        .await
        .unwrap_err();
    assert_eq!(classify(&err), Some(Violation::DuplicateMembership));

    let err = memberships::add_member(&pool, bob.id, c, Role::Owner)
        .await
        .unwrap_err();
    assert_eq!(classify(&err), Some(Violation::SecondOwner));
    assert_eq!(memberships::role_of(&pool, bob.id, c).await.unwrap(), None);
}
