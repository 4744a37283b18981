//! Report aggregation over inventory and checkout views

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Center, CheckoutView, InventoryView};

/// Quantity of a product held at another center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CenterQuantity {
    pub center_abbreviation: String,
    pub quantity: i64,
}

/// One product line of the center comparison report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonRow {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub other_centers: Vec<CenterQuantity>,
}

/// Supply levels of one center next to every other center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryComparison {
    pub center: Center,
    pub rows: Vec<ComparisonRow>,
}

/// Checkout totals for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutTotal {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: i64,
    pub checkout_count: i64,
}

/// Build the comparison rows for `center` from inventory rows of all centers.
///
/// Only products stocked at `center` appear. Quantities are summed over all
/// locations and levels; other centers are listed by abbreviation, sorted.
pub fn compare_centers(center: &Center, rows: &[InventoryView]) -> Vec<ComparisonRow> {
    let mut by_product: BTreeMap<(String, Uuid), (i64, BTreeMap<String, i64>)> = BTreeMap::new();

    for row in rows.iter().filter(|r| r.center_id == center.id) {
        by_product
            .entry((row.product_name.clone(), row.product_id))
            .or_default()
            .0 += i64::from(row.quantity);
    }

    for row in rows.iter().filter(|r| r.center_id != center.id) {
        if let Some((_, others)) = by_product.get_mut(&(row.product_name.clone(), row.product_id)) {
            *others.entry(row.center_abbreviation.clone()).or_default() += i64::from(row.quantity);
        }
    }

    by_product
        .into_iter()
        .map(|((product_name, product_id), (quantity, others))| ComparisonRow {
            product_id,
            product_name,
            quantity,
            other_centers: others
                .into_iter()
                .map(|(center_abbreviation, quantity)| CenterQuantity {
                    center_abbreviation,
                    quantity,
                })
                .collect(),
        })
        .collect()
}

/// Sum checkouts per product, largest total first
pub fn checkout_totals(checkouts: &[CheckoutView]) -> Vec<CheckoutTotal> {
    let mut totals: BTreeMap<Uuid, CheckoutTotal> = BTreeMap::new();

    for checkout in checkouts {
        let entry = totals.entry(checkout.product_id).or_insert_with(|| CheckoutTotal {
            product_id: checkout.product_id,
            product_name: checkout.product_name.clone(),
            total_quantity: 0,
            checkout_count: 0,
        });
        entry.total_quantity += i64::from(checkout.quantity);
        entry.checkout_count += 1;
    }

    let mut totals: Vec<CheckoutTotal> = totals.into_values().collect();
    totals.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    totals
}
