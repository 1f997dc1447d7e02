use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A product in one user's catalog. `quantity` is only ever changed through
/// the movement engine or an explicit owner/admin update; the schema backs
/// the non-negativity invariant with a CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub buy_price: f64,
    pub sell_price: f64,
    pub min_threshold: i32,
    pub owner_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub struct NewProduct<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub quantity: i32,
    pub buy_price: f64,
    pub sell_price: f64,
    pub min_threshold: i32,
    pub owner_id: Uuid,
}

impl Product {
    pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, quantity, buy_price, sell_price,
                   min_threshold, owner_id, created_at
            FROM products
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, quantity, buy_price, sell_price,
                   min_threshold, owner_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &PgPool, new: NewProduct<'_>) -> sqlx::Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, quantity, buy_price, sell_price,
                                  min_threshold, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, category, quantity, buy_price, sell_price,
                      min_threshold, owner_id, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.category)
        .bind(new.quantity)
        .bind(new.buy_price)
        .bind(new.sell_price)
        .bind(new.min_threshold)
        .bind(new.owner_id)
        .fetch_one(db)
        .await
    }

    /// Persists the mutable fields of an already-merged product record.
    pub async fn update(&self, db: &PgPool) -> sqlx::Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, category = $3, quantity = $4, buy_price = $5,
                sell_price = $6, min_threshold = $7
            WHERE id = $1
            RETURNING id, name, category, quantity, buy_price, sell_price,
                      min_threshold, owner_id, created_at
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.category)
        .bind(self.quantity)
        .bind(self.buy_price)
        .bind(self.sell_price)
        .bind(self.min_threshold)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_json_uses_camel_case() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Bolts M6".into(),
            category: Some("hardware".into()),
            quantity: 40,
            buy_price: 0.1,
            sell_price: 0.25,
            min_threshold: 10,
            owner_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("buyPrice").is_some());
        assert!(json.get("minThreshold").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("owner_id").is_none());
    }
}
