//! Integration tests for the repair lifecycle: status transitions, warranty
//! issuance, rework cycles, and the atomic rollback guarantees.

use assert_matches::assert_matches;
use sqlx::PgPool;

use fixdesk_core::repair::{RepairStatus, TransitionOutcome};
use fixdesk_core::warranty::parse_sequence;
use fixdesk_db::models::customer::CreateCustomer;
use fixdesk_db::models::repair::CreateRepair;
use fixdesk_db::repositories::{
    CustomerRepo, RepairRepo, StartReworkError, TransitionStatusError, WarrantyRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_customer(name: &str) -> CreateCustomer {
    CreateCustomer {
        name: name.to_string(),
        phone: "13800000000".to_string(),
        note: None,
    }
}

fn new_repair(customer_id: i64) -> CreateRepair {
    CreateRepair {
        customer_id,
        phone: "iPhone 13 Pro".to_string(),
        problems: vec!["cracked screen".to_string()],
        deposit_cents: 5_000,
        price_cents: 45_000,
    }
}

async fn seed_repair(pool: &PgPool) -> i64 {
    let customer = CustomerRepo::create(pool, &new_customer("Zhang Wei"))
        .await
        .unwrap();
    RepairRepo::create(pool, &new_repair(customer.id))
        .await
        .unwrap()
        .id
}

/// Drive a repair into the rework state: pick up (issues the warranty), then
/// start a rework under it.
async fn seed_reworking_repair(pool: &PgPool) -> (i64, String) {
    let repair_id = seed_repair(pool).await;
    let outcome = RepairRepo::transition_status(pool, repair_id, RepairStatus::PickedUp)
        .await
        .unwrap();
    let warranty_id = match outcome {
        TransitionOutcome::WarrantyIssued { warranty_id, .. } => warranty_id,
        other => panic!("expected warranty issuance, got {other:?}"),
    };
    WarrantyRepo::start_rework(pool, &warranty_id).await.unwrap();
    (repair_id, warranty_id)
}

async fn warranty_count(pool: &PgPool, repair_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM warranties WHERE repair_id = $1")
            .bind(repair_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Plain transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_starts_pending_with_ticket_no(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;
    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "pending");
    assert!(!repair.is_rework);
    assert!(repair.ticket_no.starts_with("RT-"), "{}", repair.ticket_no);
    assert_eq!(parse_sequence(&repair.ticket_no), Some(1));
}

#[sqlx::test(migrations = "./migrations")]
async fn non_terminal_transition_is_idempotent_and_touches_no_warranty(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;

    for _ in 0..2 {
        let outcome = RepairRepo::transition_status(&pool, repair_id, RepairStatus::Repairing)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            TransitionOutcome::StatusOnly {
                status: RepairStatus::Repairing
            }
        );
    }

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "repairing");
    assert_eq!(warranty_count(&pool, repair_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn transition_on_missing_repair_fails(pool: PgPool) {
    let result = RepairRepo::transition_status(&pool, 9999, RepairStatus::Repairing).await;
    assert_matches!(result, Err(TransitionStatusError::RepairNotFound(9999)));
}

#[sqlx::test(migrations = "./migrations")]
async fn rework_statuses_rejected_outside_rework(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;
    let result = RepairRepo::transition_status(&pool, repair_id, RepairStatus::Reworking).await;
    assert_matches!(result, Err(TransitionStatusError::NotAllowed(_)));

    // Nothing was written.
    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "pending");
}

// ---------------------------------------------------------------------------
// First pickup / warranty issuance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn first_pickup_issues_exactly_one_warranty(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;
    RepairRepo::transition_status(&pool, repair_id, RepairStatus::Repaired)
        .await
        .unwrap();

    let outcome = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp)
        .await
        .unwrap();

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "picked_up");

    let warranty = WarrantyRepo::find_by_repair(&pool, repair_id)
        .await
        .unwrap()
        .expect("warranty should exist after first pickup");
    assert_eq!(warranty.rework_count, 0);
    assert!(!warranty.is_rework);
    assert!(warranty.expires_at > warranty.created_at);
    assert_eq!((warranty.expires_at - warranty.created_at).num_days(), 90);
    assert_eq!(warranty_count(&pool, repair_id).await, 1);

    match outcome {
        TransitionOutcome::WarrantyIssued { ref warranty_id, .. } => {
            assert_eq!(*warranty_id, warranty.id);
            assert!(outcome_points_at_warranty_section(&outcome));
        }
        other => panic!("expected warranty issuance, got {other:?}"),
    }
}

fn outcome_points_at_warranty_section(outcome: &TransitionOutcome) -> bool {
    outcome.message().contains("warranty section")
}

#[sqlx::test(migrations = "./migrations")]
async fn second_first_time_pickup_is_rejected(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;
    RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp)
        .await
        .unwrap();

    let result = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp).await;
    assert_matches!(
        result,
        Err(TransitionStatusError::WarrantyAlreadyIssued(id)) if id == repair_id
    );
    assert_eq!(warranty_count(&pool, repair_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn warranty_sequences_increase_within_month(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Li Na")).await.unwrap();

    let mut sequences = Vec::new();
    for _ in 0..3 {
        let repair = RepairRepo::create(&pool, &new_repair(customer.id)).await.unwrap();
        let outcome = RepairRepo::transition_status(&pool, repair.id, RepairStatus::PickedUp)
            .await
            .unwrap();
        let TransitionOutcome::WarrantyIssued { warranty_id, .. } = outcome else {
            panic!("expected warranty issuance");
        };
        sequences.push(parse_sequence(&warranty_id).unwrap());
    }

    assert_eq!(sequences, vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Rework cycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn start_rework_flips_both_flags(pool: PgPool) {
    let (repair_id, warranty_id) = seed_reworking_repair(&pool).await;

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert!(repair.is_rework);
    assert_eq!(repair.status, "reworking");

    let warranty = WarrantyRepo::find_by_id(&pool, &warranty_id).await.unwrap().unwrap();
    assert!(warranty.is_rework);
    assert_eq!(warranty.rework_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn start_rework_twice_is_rejected(pool: PgPool) {
    let (_, warranty_id) = seed_reworking_repair(&pool).await;
    let result = WarrantyRepo::start_rework(&pool, &warranty_id).await;
    assert_matches!(result, Err(StartReworkError::AlreadyInRework(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn start_rework_on_expired_warranty_is_rejected(pool: PgPool) {
    let (_, warranty_id) = {
        let repair_id = seed_repair(&pool).await;
        let outcome = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp)
            .await
            .unwrap();
        let TransitionOutcome::WarrantyIssued { warranty_id, .. } = outcome else {
            panic!("expected warranty issuance");
        };
        (repair_id, warranty_id)
    };

    sqlx::query(
        "UPDATE warranties \
         SET created_at = NOW() - interval '100 days', \
             expires_at = NOW() - interval '10 days' \
         WHERE id = $1",
    )
    .bind(&warranty_id)
    .execute(&pool)
    .await
    .unwrap();

    let result = WarrantyRepo::start_rework(&pool, &warranty_id).await;
    assert_matches!(result, Err(StartReworkError::Expired(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn rework_completion_updates_existing_warranty_only(pool: PgPool) {
    let (repair_id, warranty_id) = seed_reworking_repair(&pool).await;

    // Two earlier rework cycles already completed.
    sqlx::query("UPDATE warranties SET rework_count = 2 WHERE id = $1")
        .bind(&warranty_id)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        TransitionOutcome::ReworkCompleted {
            status: RepairStatus::PickedUp,
            rework_count: 3
        }
    );
    assert!(outcome.message().contains("rework is complete"));

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert!(!repair.is_rework);
    assert_eq!(repair.status, "picked_up");

    let warranty = WarrantyRepo::find_by_id(&pool, &warranty_id).await.unwrap().unwrap();
    assert!(!warranty.is_rework);
    assert_eq!(warranty.rework_count, 3);
    assert_eq!(warranty_count(&pool, repair_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn regular_statuses_rejected_during_rework(pool: PgPool) {
    let (repair_id, _) = seed_reworking_repair(&pool).await;
    let result = RepairRepo::transition_status(&pool, repair_id, RepairStatus::Repairing).await;
    assert_matches!(result, Err(TransitionStatusError::NotAllowed(_)));

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "reworking");
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn failed_warranty_step_rolls_back_status_write(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;

    // Force an inconsistent precondition: rework flag set with no warranty
    // on file. The warranty-side step must fail and take the status write
    // down with it.
    sqlx::query("UPDATE repairs SET is_rework = true, status = 'reworking' WHERE id = $1")
        .bind(repair_id)
        .execute(&pool)
        .await
        .unwrap();

    let result = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp).await;
    assert_matches!(
        result,
        Err(TransitionStatusError::WarrantyMissing(id)) if id == repair_id
    );

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "reworking", "status write must roll back");
    assert!(repair.is_rework, "rework flag must roll back");
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_rework_clear_reports_as_pickup_failure(pool: PgPool) {
    let (repair_id, _) = seed_reworking_repair(&pool).await;

    // Make the rework-flag clear fail at the database level. The error must
    // classify as a warranty-side (pickup) failure, not a status failure,
    // and the whole transaction must roll back.
    sqlx::query(
        "CREATE FUNCTION reject_rework_clear() RETURNS trigger AS $$
         BEGIN
             IF OLD.is_rework AND NOT NEW.is_rework THEN
                 RAISE EXCEPTION 'rework clear rejected';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_reject_rework_clear
         BEFORE UPDATE ON repairs
         FOR EACH ROW EXECUTE FUNCTION reject_rework_clear()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp).await;
    assert_matches!(result, Err(TransitionStatusError::WarrantyWrite(_)));

    let repair = RepairRepo::find_by_id(&pool, repair_id).await.unwrap().unwrap();
    assert_eq!(repair.status, "reworking", "status write must roll back");
    assert!(repair.is_rework);
}

// ---------------------------------------------------------------------------
// Warranty listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn warranty_list_joins_repair_and_customer(pool: PgPool) {
    let repair_id = seed_repair(&pool).await;
    RepairRepo::transition_status(&pool, repair_id, RepairStatus::PickedUp)
        .await
        .unwrap();

    let listed = WarrantyRepo::list(&pool, None, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].repair_id, repair_id);
    assert_eq!(listed[0].customer_name, "Zhang Wei");
    assert_eq!(listed[0].repair_phone, "iPhone 13 Pro");
    assert!(listed[0].ticket_no.starts_with("RT-"));
}
