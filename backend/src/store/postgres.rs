//! PostgreSQL inventory store
//!
//! Stock movements run inside an sqlx transaction and lock the source row
//! with `SELECT ... FOR UPDATE`. Returning early drops the transaction,
//! which rolls it back.

use async_trait::async_trait;
use shared::{
    plan_checkout, plan_transfer, Center, CheckedOutBy, Checkout, CheckoutFilter, CheckoutInput,
    CheckoutView, CreateInventoryInput, Inventory, InventoryFilter, InventoryView, Product,
    TransferInput, TransferOutcome,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::InventoryStore;
use crate::error::{AppError, AppResult};

const INVENTORY_COLUMNS: &str = "id, distribution_center, product, stock_location, stock_loc_level, quantity, updated_at";

/// Inventory store backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    /// Create a new PgStore instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Map a unique-constraint violation to a duplicate entry on `field`
fn duplicate_or(err: sqlx::Error, field: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEntry(field.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list_centers(&self) -> AppResult<Vec<Center>> {
        let centers = sqlx::query_as::<_, Center>(
            "SELECT id, code, abbreviation, name FROM centers ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(centers)
    }

    async fn get_center(&self, id: Uuid) -> AppResult<Option<Center>> {
        let center = sqlx::query_as::<_, Center>(
            "SELECT id, code, abbreviation, name FROM centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(center)
    }

    async fn find_center_by_abbreviation(&self, abbreviation: &str) -> AppResult<Option<Center>> {
        let center = sqlx::query_as::<_, Center>(
            "SELECT id, code, abbreviation, name FROM centers WHERE LOWER(abbreviation) = LOWER($1)",
        )
        .bind(abbreviation)
        .fetch_optional(&self.db)
        .await?;

        Ok(center)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, part_number, description FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(product)
    }

    async fn get_checked_out_by(&self, id: Uuid) -> AppResult<Option<CheckedOutBy>> {
        let person = sqlx::query_as::<_, CheckedOutBy>(
            "SELECT id, name, distribution_center FROM checked_out_by WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(person)
    }

    async fn list_checked_out_by(&self, center: Option<Uuid>) -> AppResult<Vec<CheckedOutBy>> {
        let people = sqlx::query_as::<_, CheckedOutBy>(
            r#"
            SELECT id, name, distribution_center
            FROM checked_out_by
            WHERE ($1::uuid IS NULL OR distribution_center = $1)
            ORDER BY name
            "#,
        )
        .bind(center)
        .fetch_all(&self.db)
        .await?;

        Ok(people)
    }

    async fn get_inventory(&self, id: Uuid) -> AppResult<Option<Inventory>> {
        let item = sqlx::query_as::<_, Inventory>(&format!(
            "SELECT {} FROM inventory WHERE id = $1",
            INVENTORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    async fn list_inventory(&self, filter: &InventoryFilter) -> AppResult<Vec<InventoryView>> {
        let rows = sqlx::query_as::<_, InventoryView>(
            r#"
            SELECT i.id,
                   c.id AS center_id, c.code AS center_code,
                   c.abbreviation AS center_abbreviation, c.name AS center_name,
                   p.id AS product_id, p.name AS product_name,
                   i.stock_location, i.stock_loc_level, i.quantity
            FROM inventory i
            JOIN centers c ON c.id = i.distribution_center
            JOIN products p ON p.id = i.product
            WHERE ($1::uuid IS NULL OR i.distribution_center = $1)
              AND ($2::text IS NULL OR POSITION(LOWER($2) IN LOWER(p.name)) > 0)
              AND (NOT $3 OR i.quantity <> 0)
            ORDER BY c.name, p.name, i.stock_location, i.stock_loc_level
            "#,
        )
        .bind(filter.center)
        .bind(&filter.product_name)
        .bind(filter.in_stock_only)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn create_inventory(&self, input: &CreateInventoryInput) -> AppResult<Inventory> {
        let item = sqlx::query_as::<_, Inventory>(&format!(
            r#"
            INSERT INTO inventory (id, distribution_center, product, stock_location, stock_loc_level, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(input.distribution_center)
        .bind(input.product)
        .bind(&input.stock_location)
        .bind(&input.stock_loc_level)
        .bind(input.quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| duplicate_or(e, "stock_location"))?;

        Ok(item)
    }

    async fn list_checkouts(&self, filter: &CheckoutFilter) -> AppResult<Vec<CheckoutView>> {
        let rows = sqlx::query_as::<_, CheckoutView>(
            r#"
            SELECT co.id, co.checked_out_at,
                   c.name AS center_name,
                   p.id AS product_id, p.name AS product_name,
                   i.stock_location, i.stock_loc_level,
                   cb.id AS checked_out_by_id, cb.name AS checked_out_by_name,
                   co.inventory_item, co.quantity
            FROM checkouts co
            JOIN inventory i ON i.id = co.inventory_item
            JOIN centers c ON c.id = co.center
            JOIN products p ON p.id = i.product
            JOIN checked_out_by cb ON cb.id = co.checked_out_by
            WHERE ($1::uuid IS NULL OR co.checked_out_by = $1)
              AND ($2::uuid IS NULL OR co.inventory_item = $2)
            ORDER BY co.checked_out_at DESC
            LIMIT $3
            "#,
        )
        .bind(filter.checked_out_by)
        .bind(filter.inventory_item)
        .bind(filter.limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn checkout(&self, input: &CheckoutInput) -> AppResult<Checkout> {
        let mut tx = self.db.begin().await?;

        // Exclusive row lock until commit or rollback
        let (available, center) = sqlx::query_as::<_, (i32, Uuid)>(
            "SELECT quantity, distribution_center FROM inventory WHERE id = $1 FOR UPDATE",
        )
        .bind(input.inventory_item)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        let person_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM checked_out_by WHERE id = $1)",
        )
        .bind(input.checked_out_by)
        .fetch_one(&mut *tx)
        .await?;
        if !person_exists {
            return Err(AppError::NotFound("Checked out by".to_string()));
        }

        let remaining = plan_checkout(available, input.quantity)?;

        sqlx::query("UPDATE inventory SET quantity = $1, updated_at = NOW() WHERE id = $2")
            .bind(remaining)
            .bind(input.inventory_item)
            .execute(&mut *tx)
            .await?;

        let checkout = sqlx::query_as::<_, Checkout>(
            r#"
            INSERT INTO checkouts (id, center, inventory_item, checked_out_by, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, center, inventory_item, checked_out_by, quantity, checked_out_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(center)
        .bind(input.inventory_item)
        .bind(input.checked_out_by)
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(checkout)
    }

    async fn transfer(&self, input: &TransferInput) -> AppResult<TransferOutcome> {
        let mut tx = self.db.begin().await?;

        // Source and any existing destination row, locked together in id order
        let locked = sqlx::query_as::<_, Inventory>(&format!(
            r#"
            SELECT {}
            FROM inventory
            WHERE id = $1
               OR (distribution_center, product, stock_location, stock_loc_level) =
                  (SELECT distribution_center, product, $2::text, $3::text FROM inventory WHERE id = $1)
            ORDER BY id
            FOR UPDATE
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(input.inventory_item)
        .bind(&input.stock_location)
        .bind(&input.stock_loc_level)
        .fetch_all(&mut *tx)
        .await?;

        let source = locked
            .iter()
            .find(|row| row.id == input.inventory_item)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        if source.stock_location == input.stock_location
            && source.stock_loc_level == input.stock_loc_level
        {
            return Err(AppError::validation(
                "stock_location",
                "Destination is the same as the current location",
            ));
        }

        let destination_current = locked
            .iter()
            .find(|row| row.id != source.id)
            .map_or(0, |row| row.quantity);

        let plan = plan_transfer(source.quantity, destination_current, input.quantity)?;

        let source = sqlx::query_as::<_, Inventory>(&format!(
            "UPDATE inventory SET quantity = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            INVENTORY_COLUMNS
        ))
        .bind(plan.source_remaining)
        .bind(source.id)
        .fetch_one(&mut *tx)
        .await?;

        // A destination created by a concurrent transfer is merged by the
        // conflict clause instead of failing
        let destination = sqlx::query_as::<_, Inventory>(&format!(
            r#"
            INSERT INTO inventory (id, distribution_center, product, stock_location, stock_loc_level, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (distribution_center, product, stock_location, stock_loc_level)
            DO UPDATE SET quantity = inventory.quantity + EXCLUDED.quantity, updated_at = NOW()
            RETURNING {}
            "#,
            INVENTORY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(source.distribution_center)
        .bind(source.product)
        .bind(&input.stock_location)
        .bind(&input.stock_loc_level)
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TransferOutcome {
            source,
            destination,
            quantity: input.quantity,
        })
    }
}
