use pretty_assertions::assert_eq;

use leavedesk_core::{
    errors::HrError,
    models::shift::{CreateSwapRequest, ShiftTime, SwapStatus, UpdateSwapRequest},
    services::swap,
};

mod common;
use common::*;

async fn store_with_shift() -> (leavedesk_core::memory::InMemoryStore, leavedesk_core::models::shift::Shift) {
    let store = seeded_store().await;
    let monday = shift(DEVELOPER, date(2025, 6, 9), ShiftTime::Morning);
    store.add_shift(monday.clone()).await;
    (store, monday)
}

fn to(shift_id: uuid::Uuid, change_to: ShiftTime) -> CreateSwapRequest {
    CreateSwapRequest { shift_id, change_to }
}

#[test_log::test(tokio::test)]
async fn test_approve_swap_moves_shift() {
    let (store, monday) = store_with_shift().await;

    let request = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();
    assert_eq!(request.change_from, ShiftTime::Morning);
    assert_eq!(request.change_to, ShiftTime::Night);
    assert_eq!(request.shift_date, monday.shift_date);
    assert_eq!(request.status, SwapStatus::Pending);

    let approved = swap::approve(&store, MANAGER, request.id, now()).await.unwrap();
    assert_eq!(approved.status, SwapStatus::Approved);

    let state = store.snapshot().await;
    assert_eq!(state.shifts[&monday.id].shift_time, ShiftTime::Night);
    assert_eq!(state.swap_requests[&request.id].status, SwapStatus::Approved);

    let again = swap::approve(&store, MANAGER, request.id, now()).await;
    assert!(matches!(again, Err(HrError::Conflict(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_swap_approvals_move_shift_once() {
    let (store, monday) = store_with_shift().await;
    let request = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        swap::approve(&store, MANAGER, request.id, now()),
        swap::approve(&store, MANAGER, request.id, now()),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Err(HrError::Conflict(_))))
            .count(),
        1
    );

    let state = store.snapshot().await;
    assert_eq!(state.shifts[&monday.id].shift_time, ShiftTime::Night);
    assert_eq!(state.swap_requests[&request.id].status, SwapStatus::Approved);
    assert_eq!(state.swap_requests[&request.id].change_from, ShiftTime::Morning);
}

#[tokio::test]
async fn test_reject_and_cancel_leave_shift_alone() {
    let (store, monday) = store_with_shift().await;

    let first = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();
    let cancelled = swap::cancel(&store, DEVELOPER, first.id, now()).await.unwrap();
    assert_eq!(cancelled.status, SwapStatus::Cancelled);

    // A cancelled request frees the shift for a new one
    let second = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Afternoon), now())
        .await
        .unwrap();
    let rejected = swap::reject(&store, MANAGER, second.id, now()).await.unwrap();
    assert_eq!(rejected.status, SwapStatus::Rejected);

    assert_eq!(
        store.snapshot().await.shifts[&monday.id].shift_time,
        ShiftTime::Morning
    );

    // A rejected one does not
    let third = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now()).await;
    assert!(matches!(third, Err(HrError::Conflict(msg)) if msg == "Swap already requested"));
}

#[tokio::test]
async fn test_create_guards() {
    let (store, monday) = store_with_shift().await;
    let today_shift = shift(DEVELOPER, now().date(), ShiftTime::Morning);
    store.add_shift(today_shift.clone()).await;

    let for_today = swap::create(&store, DEVELOPER, to(today_shift.id, ShiftTime::Night), now()).await;
    let not_mine = swap::create(&store, TESTER, to(monday.id, ShiftTime::Night), now()).await;
    let missing = swap::create(&store, DEVELOPER, to(uuid::Uuid::new_v4(), ShiftTime::Night), now()).await;

    assert!(matches!(for_today, Err(HrError::Validation(_))));
    assert!(matches!(not_mine, Err(HrError::Authorization(_))));
    assert!(matches!(missing, Err(HrError::NotFound(_))));

    swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();
    let duplicate = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Afternoon), now()).await;
    assert!(matches!(duplicate, Err(HrError::Conflict(_))));
}

#[tokio::test]
async fn test_update_swap_request() {
    let (store, monday) = store_with_shift().await;
    let request = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();

    let same_to = swap::update(
        &store,
        DEVELOPER,
        request.id,
        UpdateSwapRequest { change_to: ShiftTime::Night },
        now(),
    )
    .await;
    let back_to_from = swap::update(
        &store,
        DEVELOPER,
        request.id,
        UpdateSwapRequest { change_to: ShiftTime::Morning },
        now(),
    )
    .await;
    let stranger = swap::update(
        &store,
        TESTER,
        request.id,
        UpdateSwapRequest { change_to: ShiftTime::Afternoon },
        now(),
    )
    .await;

    assert!(matches!(same_to, Err(HrError::Validation(_))));
    assert!(matches!(back_to_from, Err(HrError::Validation(_))));
    assert!(matches!(stranger, Err(HrError::Authorization(_))));

    let updated = swap::update(
        &store,
        DEVELOPER,
        request.id,
        UpdateSwapRequest { change_to: ShiftTime::Afternoon },
        now(),
    )
    .await
    .unwrap();
    assert_eq!(updated.change_to, ShiftTime::Afternoon);
    assert_eq!(updated.change_from, ShiftTime::Morning);
}

#[tokio::test]
async fn test_only_own_manager_decides_swaps() {
    let (store, monday) = store_with_shift().await;
    let request = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();

    let approve = swap::approve(&store, OTHER_MANAGER, request.id, now()).await;
    let reject = swap::reject(&store, OTHER_MANAGER, request.id, now()).await;

    assert!(matches!(approve, Err(HrError::Authorization(_))));
    assert!(matches!(reject, Err(HrError::Authorization(_))));
    assert_eq!(
        store.snapshot().await.shifts[&monday.id].shift_time,
        ShiftTime::Morning
    );
}

#[tokio::test]
async fn test_swap_listings() {
    let (store, monday) = store_with_shift().await;
    let tuesday = shift(TESTER, date(2025, 6, 10), ShiftTime::Afternoon);
    store.add_shift(tuesday.clone()).await;

    let mine = swap::create(&store, DEVELOPER, to(monday.id, ShiftTime::Night), now())
        .await
        .unwrap();
    let theirs = swap::create(&store, TESTER, to(tuesday.id, ShiftTime::Morning), now())
        .await
        .unwrap();
    swap::approve(&store, MANAGER, theirs.id, now()).await.unwrap();

    let own = swap::my_requests(&store, DEVELOPER, now().date()).await.unwrap();
    assert_eq!(own.iter().map(|r| r.id).collect::<Vec<_>>(), vec![mine.id]);

    let pending = swap::team_pending(&store, MANAGER, now().date()).await.unwrap();
    assert_eq!(pending.iter().map(|r| r.id).collect::<Vec<_>>(), vec![mine.id]);
}
