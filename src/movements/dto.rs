use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::movements::repo::StockMovement;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementRequest {
    pub product_id: Uuid,
    /// Raw movement type; validated by the engine so unknown values are
    /// reported as invalid rather than failing deserialization.
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw for the same reason: the engine reports fractional or
    /// non-positive quantities as invalid, after the type check.
    pub quantity: serde_json::Number,
    pub note: Option<String>,
    /// Admin-only: apply to this user's inventory instead of the caller's.
    pub user_id: Option<Uuid>,
}

/// `?userId=` filter for admin listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MovementsEnvelope {
    pub movements: Vec<StockMovement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_reads_type_and_camel_case_ids() {
        let req: CreateMovementRequest = serde_json::from_str(
            r#"{"productId":"7f3c6a1e-2a67-44a5-9d4e-0b8e4c1a2b3c","type":"out","quantity":2}"#,
        )
        .unwrap();
        assert_eq!(req.kind, "out");
        assert_eq!(req.quantity.as_i64(), Some(2));
        assert!(req.note.is_none());
        assert!(req.user_id.is_none());
    }

    #[test]
    fn create_request_keeps_fractional_quantity_raw() {
        let req: CreateMovementRequest = serde_json::from_str(
            r#"{"productId":"7f3c6a1e-2a67-44a5-9d4e-0b8e4c1a2b3c","type":"out","quantity":2.5}"#,
        )
        .unwrap();
        assert_eq!(req.quantity.as_f64(), Some(2.5));
        assert!(req.quantity.as_i64().is_none());
    }

    #[test]
    fn create_request_keeps_unknown_type_raw() {
        let req: CreateMovementRequest = serde_json::from_str(
            r#"{"productId":"7f3c6a1e-2a67-44a5-9d4e-0b8e4c1a2b3c","type":"sideways","quantity":1}"#,
        )
        .unwrap();
        assert_eq!(req.kind, "sideways");
    }
}
