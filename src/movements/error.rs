use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Everything that can stop a movement from being applied. All variants
/// except `Storage` are deterministic for a given request; only `Storage`
/// is worth retrying.
#[derive(Debug, Error)]
pub enum MovementError {
    #[error("invalid movement type, expected \"in\" or \"out\"")]
    InvalidMovementType,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("not authorized to move stock for this product")]
    Unauthorized,

    #[error("insufficient stock, current quantity: {current}")]
    InsufficientStock { current: i32 },

    #[error("storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),
}

impl MovementError {
    pub fn status(&self) -> StatusCode {
        match self {
            MovementError::InvalidMovementType
            | MovementError::InvalidQuantity
            | MovementError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            MovementError::ProductNotFound => StatusCode::NOT_FOUND,
            MovementError::Unauthorized => StatusCode::FORBIDDEN,
            MovementError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MovementError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "movement rejected by storage");
        } else {
            tracing::warn!(error = %self, "movement rejected");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(
            MovementError::InvalidMovementType.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MovementError::InvalidQuantity.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MovementError::ProductNotFound.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(MovementError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            MovementError::InsufficientStock { current: 4 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MovementError::Storage(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn insufficient_stock_message_carries_current_quantity() {
        let err = MovementError::InsufficientStock { current: 10 };
        assert!(err.to_string().contains("10"));
    }
}
