use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::repo::Product;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub buy_price: f64,
    #[serde(default)]
    pub sell_price: f64,
    #[serde(default)]
    pub min_threshold: i32,
    /// Honored only for admin callers.
    pub owner_id: Option<Uuid>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub min_threshold: Option<i32>,
}

/// `?userId=` filter for admin listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_camel_case_fields() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name":"Screws","buyPrice":1.5,"sellPrice":2.0,"minThreshold":5,"quantity":3}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Screws");
        assert_eq!(req.buy_price, 1.5);
        assert_eq!(req.min_threshold, 5);
        assert!(req.owner_id.is_none());
    }

    #[test]
    fn create_request_defaults_numeric_fields() {
        let req: CreateProductRequest = serde_json::from_str(r#"{"name":"Nails"}"#).unwrap();
        assert_eq!(req.quantity, 0);
        assert_eq!(req.buy_price, 0.0);
        assert_eq!(req.min_threshold, 0);
    }
}
