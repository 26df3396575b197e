mod common;

use polecat_clubs::applications;
use polecat_common::error::PolecatError;
use polecat_common::models::{ApplicationStatus, CreateApplicationRequest};
use polecat_common::role::Role;
use polecat_db::repository::{applications as stored, memberships};
use uuid::Uuid;

use common::{club, join, setup, user};

fn statement(text: &str) -> CreateApplicationRequest {
    CreateApplicationRequest {
        personal_statement: text.into(),
    }
}

#[tokio::test]
async fn second_application_is_refused_while_pending() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);

    let err = applications::apply(&pool, x.id, c, &statement("Hi again"))
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
    assert_eq!(
        stored::count_with_status(&pool, x.id, c, ApplicationStatus::Pending)
            .await
            .unwrap(),
        1
    );
    assert_eq!(applications::my_applications(&pool, x.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn accepting_creates_exactly_one_membership() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let officer = user(&pool, "officer").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &officer, Role::Officer).await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();
    let member = applications::accept(&pool, officer.id, c, application.id).await.unwrap();

    assert_eq!(member.role, Role::Member);
    assert_eq!(member.user_id, x.id);
    let row = stored::find_by_id(&pool, application.id).await.unwrap().unwrap();
    assert_eq!(row.status, ApplicationStatus::Accepted);

    let err = applications::accept(&pool, officer.id, c, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
    let err = applications::reject(&pool, officer.id, c, application.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));

    let members = memberships::list_members(&pool, c).await.unwrap();
    assert_eq!(members.iter().filter(|m| m.user_id == x.id).count(), 1);
}

#[tokio::test]
async fn members_cannot_review() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let m = user(&pool, "member").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &m, Role::Member).await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();

    let err = applications::accept(&pool, m.id, c, application.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));
    let err = applications::pending_for_club(&pool, m.id, c).await.unwrap_err();
    assert!(matches!(err, PolecatError::Forbidden { .. }));
    assert_eq!(memberships::role_of(&pool, x.id, c).await.unwrap(), None);
}

#[tokio::test]
async fn reject_leaves_room_for_a_new_application() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;

    let first = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();
    applications::reject(&pool, owner.id, c, first.id).await.unwrap();
    assert_eq!(memberships::role_of(&pool, x.id, c).await.unwrap(), None);

    let second = applications::apply(&pool, x.id, c, &statement("Please")).await.unwrap();
    let queue = applications::pending_for_club(&pool, owner.id, c).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, second.id);
    assert_eq!(queue[0].username, "xavier");
}

#[tokio::test]
async fn members_cannot_reapply_but_former_members_can() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;
    join(&pool, &owner, c, &x, Role::Member).await;

    let err = applications::apply(&pool, x.id, c, &statement("Again")).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));

    polecat_clubs::membership::leave(&pool, x.id, c).await.unwrap();
    applications::apply(&pool, x.id, c, &statement("Back")).await.unwrap();
}

#[tokio::test]
async fn storage_rejects_a_second_pending_application() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;

    stored::create_application(&pool, x.id, c, "one", ApplicationStatus::Pending)
        .await
        .unwrap();
    let err = stored::create_application(&pool, x.id, c, "two", ApplicationStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(
        polecat_db::constraint::classify(&err),
        Some(polecat_db::constraint::Violation::ActiveApplicationExists)
    );

    // Rejected rows are never capped.
    for _ in 0..3 {
        stored::create_application(&pool, x.id, c, "old", ApplicationStatus::Rejected)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn cancel_only_own_pending_application() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let y = user(&pool, "yolanda").await;
    let c = club(&pool, &owner, "Knights").await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();

    let err = applications::cancel(&pool, y.id, application.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));

    applications::cancel(&pool, x.id, application.id).await.unwrap();
    assert!(stored::find_by_id(&pool, application.id).await.unwrap().is_none());

    let err = applications::cancel(&pool, x.id, application.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));
}

#[tokio::test]
async fn processed_application_cannot_be_cancelled() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();
    applications::accept(&pool, owner.id, c, application.id).await.unwrap();

    let err = applications::cancel(&pool, x.id, application.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::StateConflict { .. }));
}

#[tokio::test]
async fn application_of_another_club_is_not_found() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let rival = user(&pool, "rival").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;
    let d = club(&pool, &rival, "Bishops").await;

    let application = applications::apply(&pool, x.id, c, &statement("Hi")).await.unwrap();

    let err = applications::accept(&pool, rival.id, d, application.id).await.unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));
    let err = applications::apply(&pool, x.id, Uuid::now_v7(), &statement("Hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, PolecatError::NotFound { .. }));
}

#[tokio::test]
async fn blank_statement_is_a_field_error() {
    let pool = setup().await;
    let owner = user(&pool, "owner").await;
    let x = user(&pool, "xavier").await;
    let c = club(&pool, &owner, "Knights").await;

    match applications::apply(&pool, x.id, c, &statement("   ")).await {
        Err(PolecatError::Validation { field, .. }) => {
            assert_eq!(field.as_deref(), Some("personal_statement"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
