use serde::{Deserialize, Serialize};

/// Envelope returned by every store operation.
///
/// A failure here is an expected outcome (missing anchor, duplicate id) and
/// still travels as a normal response; backend faults are reported through
/// [`StoreError`](crate::StoreError) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> ServiceResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_payload() {
        let resp = ServiceResponse::success(vec![1, 2]);
        assert!(resp.is_success());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "success": true, "message": "", "payload": [1, 2] })
        );
    }

    #[test]
    fn failure_has_null_payload() {
        let resp: ServiceResponse<String> = ServiceResponse::failure("Failed to find anchor");
        assert!(!resp.is_success());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "success": false, "message": "Failed to find anchor", "payload": null })
        );
    }

    #[test]
    fn unit_payload_serializes_as_null() {
        let resp = ServiceResponse::success(());
        assert_eq!(serde_json::to_value(&resp).unwrap()["payload"], json!(null));
    }
}
