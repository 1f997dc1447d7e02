use serde::Serialize;

/// Plain `{message}` body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_shape() {
        let json = serde_json::to_value(MessageResponse {
            message: "Deleted".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"message": "Deleted"}));
    }
}
