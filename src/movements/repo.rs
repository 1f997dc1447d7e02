use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
}

impl FromStr for MovementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementKind::In),
            "out" => Ok(MovementKind::Out),
            _ => Err(()),
        }
    }
}

/// An immutable ledger entry. `product_name` is a snapshot taken when the
/// movement was applied; it does not track later renames.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: Option<String>,
    pub product_id: Uuid,
    pub product_name: String,
    pub user_id: Uuid,
}

impl StockMovement {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<StockMovement>> {
        sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, date, kind, quantity, note, product_id, product_name, user_id
            FROM stock_movements
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_exact_tokens_only() {
        assert_eq!("in".parse::<MovementKind>(), Ok(MovementKind::In));
        assert_eq!("out".parse::<MovementKind>(), Ok(MovementKind::Out));
        assert!("IN".parse::<MovementKind>().is_err());
        assert!("transfer".parse::<MovementKind>().is_err());
        assert!("".parse::<MovementKind>().is_err());
    }

    #[test]
    fn movement_json_exposes_kind_as_type() {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            date: OffsetDateTime::now_utc(),
            kind: MovementKind::Out,
            quantity: 3,
            note: None,
            product_id: Uuid::new_v4(),
            product_name: "Bolts M6".into(),
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["type"], "out");
        assert!(json.get("productId").is_some());
        assert!(json.get("productName").is_some());
        assert!(json.get("kind").is_none());
    }
}
