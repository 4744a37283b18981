//! Transfer tests: moving stock between locations of one center

mod common;

use common::Fixture;
use shared::{CheckoutInput, InventoryFilter, TransferInput};
use stockroom_backend::error::AppError;
use stockroom_backend::services::{CheckoutService, TransferService};
use uuid::Uuid;

fn transfer_input(item: Uuid, quantity: i32, location: &str, level: &str) -> TransferInput {
    TransferInput {
        inventory_item: item,
        quantity,
        stock_location: location.to_string(),
        stock_loc_level: level.to_string(),
    }
}

#[tokio::test]
async fn test_transfer_creates_destination_row() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    let outcome = service
        .transfer(transfer_input(fx.north_gloves, 4, "Cabinet 5", "2"))
        .await
        .unwrap();

    assert_eq!(outcome.quantity, 4);
    assert_eq!(outcome.source.id, fx.north_gloves);
    assert_eq!(outcome.source.quantity, 6);
    assert_eq!(outcome.destination.quantity, 4);
    assert_eq!(outcome.destination.stock_location, "Cabinet 5");
    assert_eq!(outcome.destination.stock_loc_level, "2");
    assert_eq!(outcome.destination.product, fx.gloves.id);
    assert_eq!(outcome.destination.distribution_center, fx.north.id);
    assert_eq!(fx.quantity(fx.north_gloves).await, 6);
}

#[tokio::test]
async fn test_transfer_merges_into_existing_row() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    // Tape moves from Cabinet 2/3 into the empty Cabinet 3/1 row
    let outcome = service
        .transfer(transfer_input(fx.north_tape, 3, "Cabinet 3", "1"))
        .await
        .unwrap();

    assert_eq!(outcome.destination.id, fx.north_tape_empty);
    assert_eq!(fx.quantity(fx.north_tape).await, 1);
    assert_eq!(fx.quantity(fx.north_tape_empty).await, 3);

    let tape_rows = fx
        .store
        .list_inventory(&InventoryFilter {
            center: Some(fx.north.id),
            product_name: Some("tape".to_string()),
            in_stock_only: false,
        })
        .await
        .unwrap();
    assert_eq!(tape_rows.len(), 2);
}

#[tokio::test]
async fn test_transfer_all_stock_leaves_zero_row() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    service
        .transfer(transfer_input(fx.north_tape, 4, "Cabinet 1", "5"))
        .await
        .unwrap();

    assert_eq!(fx.quantity(fx.north_tape).await, 0);
}

#[tokio::test]
async fn test_transfer_more_than_available() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    let err = service
        .transfer(transfer_input(fx.north_tape, 5, "Cabinet 3", "1"))
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
    assert_eq!(fx.quantity(fx.north_tape_empty).await, 0);
}

#[tokio::test]
async fn test_transfer_to_same_slot_rejected() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    let err = service
        .transfer(transfer_input(fx.north_gloves, 1, "Cabinet 1", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "stock_location"));
    assert_eq!(fx.quantity(fx.north_gloves).await, 10);
}

#[tokio::test]
async fn test_transfer_location_must_belong_to_center() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    // "Bulk Shelf" only exists at South
    let err = service
        .transfer(transfer_input(fx.north_gloves, 1, "Bulk Shelf", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "stock_location"));

    let err = service
        .transfer(transfer_input(fx.north_gloves, 1, "Cabinet 2", "9"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "stock_loc_level"));

    let moved = service
        .transfer(transfer_input(fx.south_gloves, 5, "Cabinet 4", "1"))
        .await
        .unwrap();
    assert_eq!(moved.destination.distribution_center, fx.south.id);
}

#[tokio::test]
async fn test_transfer_rejects_bad_quantity_and_unknown_item() {
    let fx = Fixture::new();
    let service = TransferService::new(fx.store.clone());

    let err = service
        .transfer(transfer_input(fx.north_gloves, 0, "Cabinet 2", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "quantity"));

    let err = service
        .transfer(transfer_input(Uuid::new_v4(), 1, "Cabinet 2", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_transfer_and_checkout_conserve_stock() {
    let fx = Fixture::new();
    let transfers = TransferService::new(fx.store.clone());
    let checkouts = CheckoutService::new(fx.store.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let transfers = transfers.clone();
        let checkouts = checkouts.clone();
        let item = fx.north_gloves;
        let center = fx.north.id;
        let person = fx.avery.id;
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                transfers
                    .transfer(transfer_input(item, 2, "Cabinet 6", "4"))
                    .await
                    .map(|_| 0)
            } else {
                checkouts
                    .checkout(CheckoutInput {
                        center,
                        inventory_item: item,
                        checked_out_by: person,
                        quantity: 2,
                    })
                    .await
                    .map(|c| c.quantity)
            }
        }));
    }

    let mut checked_out = 0;
    for handle in handles {
        if let Ok(quantity) = handle.await.unwrap() {
            checked_out += quantity;
        }
    }

    let rows = fx
        .store
        .list_inventory(&InventoryFilter {
            center: Some(fx.north.id),
            product_name: Some("gloves".to_string()),
            in_stock_only: false,
        })
        .await
        .unwrap();
    let on_hand: i32 = rows.iter().map(|r| r.quantity).sum();

    assert!(rows.iter().all(|r| r.quantity >= 0));
    assert_eq!(on_hand + checked_out, 10);
}
