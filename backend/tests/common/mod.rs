//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use shared::{Center, CheckedOutBy, Product};
use stockroom_backend::store::memory::SeedInventory;
use stockroom_backend::store::{MemorySeed, MemoryStore, SharedStore};
use uuid::Uuid;

/// Two centers, two products, one person per center and a few stock rows
pub struct Fixture {
    pub store: SharedStore,
    pub north: Center,
    pub south: Center,
    pub gloves: Product,
    pub tape: Product,
    pub avery: CheckedOutBy,
    pub riley: CheckedOutBy,
    /// North, Cabinet 1 level 1: 10 gloves
    pub north_gloves: Uuid,
    /// North, Cabinet 2 level 3: 4 tape
    pub north_tape: Uuid,
    /// North, Cabinet 3 level 1: 0 tape
    pub north_tape_empty: Uuid,
    /// South, Bulk Shelf level 2: 25 gloves
    pub south_gloves: Uuid,
}

fn center(code: &str, abbreviation: &str, name: &str) -> Center {
    Center {
        id: Uuid::new_v4(),
        code: code.to_string(),
        abbreviation: abbreviation.to_string(),
        name: name.to_string(),
    }
}

fn product(name: &str, part_number: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        part_number: Some(part_number.to_string()),
        description: None,
    }
}

fn stock(
    center: &Center,
    product: &Product,
    location: &str,
    level: &str,
    quantity: i32,
) -> SeedInventory {
    SeedInventory {
        id: Uuid::new_v4(),
        distribution_center: center.id,
        product: product.id,
        stock_location: location.to_string(),
        stock_loc_level: level.to_string(),
        quantity,
    }
}

impl Fixture {
    pub fn new() -> Self {
        let north = center("710", "NTH", "North Distribution Center");
        let south = center("730", "STH", "South Distribution Center");
        let gloves = product("Nitrile Gloves (L)", "GLV-L");
        let tape = product("Packing Tape", "TAPE-48");
        let avery = CheckedOutBy {
            id: Uuid::new_v4(),
            name: "Avery Shaw".to_string(),
            distribution_center: north.id,
        };
        let riley = CheckedOutBy {
            id: Uuid::new_v4(),
            name: "Riley Chen".to_string(),
            distribution_center: south.id,
        };

        let inventory = vec![
            stock(&north, &gloves, "Cabinet 1", "1", 10),
            stock(&north, &tape, "Cabinet 2", "3", 4),
            stock(&north, &tape, "Cabinet 3", "1", 0),
            stock(&south, &gloves, "Bulk Shelf", "2", 25),
        ];
        let ids: Vec<Uuid> = inventory.iter().map(|row| row.id).collect();

        let seed = MemorySeed {
            centers: vec![north.clone(), south.clone()],
            products: vec![gloves.clone(), tape.clone()],
            checked_out_by: vec![avery.clone(), riley.clone()],
            inventory,
        };
        let store: SharedStore = Arc::new(MemoryStore::from_seed(seed).expect("valid seed"));

        Self {
            store,
            north,
            south,
            gloves,
            tape,
            avery,
            riley,
            north_gloves: ids[0],
            north_tape: ids[1],
            north_tape_empty: ids[2],
            south_gloves: ids[3],
        }
    }

    pub async fn quantity(&self, id: Uuid) -> i32 {
        self.store
            .get_inventory(id)
            .await
            .expect("store read")
            .expect("inventory row")
            .quantity
    }
}
