//! Checkout transaction tests
//!
//! Covers the stock invariant (quantity never goes negative), the
//! all-or-nothing effect of a failed checkout and serialized concurrent
//! checkouts on one inventory row.

mod common;

use common::Fixture;
use proptest::prelude::*;
use shared::{CheckoutFilter, CheckoutInput};
use stockroom_backend::error::AppError;
use stockroom_backend::services::CheckoutService;
use uuid::Uuid;

fn checkout_input(fx: &Fixture, item: Uuid, quantity: i32) -> CheckoutInput {
    CheckoutInput {
        center: fx.north.id,
        inventory_item: item,
        checked_out_by: fx.avery.id,
        quantity,
    }
}

#[tokio::test]
async fn test_checkout_decrements_and_records() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let checkout = service
        .checkout(checkout_input(&fx, fx.north_gloves, 3))
        .await
        .unwrap();

    assert_eq!(checkout.quantity, 3);
    assert_eq!(checkout.center, fx.north.id);
    assert_eq!(checkout.checked_out_by, fx.avery.id);
    assert_eq!(fx.quantity(fx.north_gloves).await, 7);

    let history = fx.store.list_checkouts(&CheckoutFilter::default()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, checkout.id);
    assert_eq!(history[0].checked_out_by_name, "Avery Shaw");
    assert_eq!(history[0].product_name, "Nitrile Gloves (L)");
}

#[tokio::test]
async fn test_checkout_entire_stock() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    service
        .checkout(checkout_input(&fx, fx.north_tape, 4))
        .await
        .unwrap();

    assert_eq!(fx.quantity(fx.north_tape).await, 0);
}

#[tokio::test]
async fn test_insufficient_stock_changes_nothing() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let err = service
        .checkout(checkout_input(&fx, fx.north_tape, 5))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientStock {
            requested: 5,
            available: 4
        }
    ));
    assert_eq!(fx.quantity(fx.north_tape).await, 4);
    let history = fx.store.list_checkouts(&CheckoutFilter::default()).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_checkout_rejects_non_positive_quantity() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    for quantity in [0, -3] {
        let err = service
            .checkout(checkout_input(&fx, fx.north_gloves, quantity))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "quantity"));
    }
    assert_eq!(fx.quantity(fx.north_gloves).await, 10);
}

#[tokio::test]
async fn test_checkout_person_from_other_center() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let input = CheckoutInput {
        checked_out_by: fx.riley.id,
        ..checkout_input(&fx, fx.north_gloves, 1)
    };
    let err = service.checkout(input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "checked_out_by"));
    assert_eq!(fx.quantity(fx.north_gloves).await, 10);
}

#[tokio::test]
async fn test_checkout_item_from_other_center() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let err = service
        .checkout(checkout_input(&fx, fx.south_gloves, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "inventory_item"));
    assert_eq!(fx.quantity(fx.south_gloves).await, 25);
}

#[tokio::test]
async fn test_checkout_unknown_references() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let unknown_item = checkout_input(&fx, Uuid::new_v4(), 1);
    assert!(matches!(
        service.checkout(unknown_item).await,
        Err(AppError::NotFound(_))
    ));

    let unknown_center = CheckoutInput {
        center: Uuid::new_v4(),
        ..checkout_input(&fx, fx.north_gloves, 1)
    };
    assert!(matches!(
        service.checkout(unknown_center).await,
        Err(AppError::NotFound(_))
    ));

    let unknown_person = CheckoutInput {
        checked_out_by: Uuid::new_v4(),
        ..checkout_input(&fx, fx.north_gloves, 1)
    };
    assert!(matches!(
        service.checkout(unknown_person).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_store_reports_unknown_person_before_stock() {
    let fx = Fixture::new();

    let input = CheckoutInput {
        checked_out_by: Uuid::new_v4(),
        ..checkout_input(&fx, fx.north_tape, 50)
    };
    let err = fx.store.checkout(&input).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(ref resource) if resource == "Checked out by"));
    assert_eq!(fx.quantity(fx.north_tape).await, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkouts_never_oversell() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let first = tokio::spawn({
        let service = service.clone();
        let input = checkout_input(&fx, fx.north_gloves, 6);
        async move { service.checkout(input).await }
    });
    let second = tokio::spawn({
        let service = service.clone();
        let input = checkout_input(&fx, fx.north_gloves, 6);
        async move { service.checkout(input).await }
    });

    let results = [first.await.unwrap(), second.await.unwrap()];
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::InsufficientStock { available: 4, .. })))
        .count();

    assert_eq!(succeeded, 1);
    assert_eq!(rejected, 1);
    assert_eq!(fx.quantity(fx.north_gloves).await, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_single_unit_checkouts_drain_exactly() {
    let fx = Fixture::new();
    let service = CheckoutService::new(fx.store.clone());

    let mut handles = Vec::new();
    for _ in 0..25 {
        let service = service.clone();
        let input = checkout_input(&fx, fx.north_gloves, 1);
        handles.push(tokio::spawn(async move { service.checkout(input).await }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(fx.quantity(fx.north_gloves).await, 0);
    let history = fx.store.list_checkouts(&CheckoutFilter::default()).await.unwrap();
    assert_eq!(history.len(), 10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The remaining quantity equals the opening stock minus what was
    /// recorded, and never drops below zero
    #[test]
    fn prop_checkouts_conserve_stock(requests in prop::collection::vec(-2i32..8, 1..12)) {
        tokio_test::block_on(async {
            let fx = Fixture::new();
            let service = CheckoutService::new(fx.store.clone());

            for quantity in requests {
                let _ = service.checkout(checkout_input(&fx, fx.north_gloves, quantity)).await;
            }

            let remaining = fx.quantity(fx.north_gloves).await;
            let history = fx.store.list_checkouts(&CheckoutFilter::default()).await.unwrap();
            let taken: i32 = history.iter().map(|c| c.quantity).sum();

            prop_assert!(remaining >= 0);
            prop_assert_eq!(remaining + taken, 10);
            prop_assert!(history.iter().all(|c| c.quantity >= 1));
            Ok(())
        })?;
    }
}
