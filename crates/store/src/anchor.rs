//! Anchor data model and shape validation.
//!
//! An anchor pins a reference to a region of a node. The wire format is
//! camelCase JSON:
//!
//! ```json
//! {
//!   "anchorId": "a1",
//!   "nodeId": "n1",
//!   "extent": { "type": "text", "startCharacter": 0, "endCharacter": 5, "text": "hello" }
//! }
//! ```
//!
//! `extent` is optional; an anchor without one points at the whole node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An anchor attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Anchor {
    /// Unique identifier, assigned by the client.
    pub anchor_id: String,
    /// Node the anchor belongs to.
    pub node_id: String,
    /// Region of the node the anchor points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
}

/// Region of a node referenced by an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum Extent {
    /// Character range inside a text node.
    #[serde(rename_all = "camelCase")]
    Text {
        start_character: f64,
        end_character: f64,
        text: String,
    },
    /// Rectangle inside an image node.
    Image {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

impl Anchor {
    pub fn new(anchor_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            node_id: node_id.into(),
            extent: None,
        }
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Decode an untyped JSON value, rejecting missing, mistyped or unknown fields.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Returns `true` when `value` has the shape of an [`Anchor`].
pub fn is_anchor(value: &Value) -> bool {
    Anchor::from_value(value.clone()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_anchor() {
        let value = json!({ "anchorId": "a1", "nodeId": "n1" });
        assert!(is_anchor(&value));

        let anchor = Anchor::from_value(value).unwrap();
        assert_eq!(anchor, Anchor::new("a1", "n1"));
    }

    #[test]
    fn accepts_null_extent() {
        assert!(is_anchor(
            &json!({ "anchorId": "a1", "nodeId": "n1", "extent": null })
        ));
    }

    #[test]
    fn accepts_text_and_image_extents() {
        let text = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "text", "startCharacter": 2, "endCharacter": 9, "text": "anchored" }
        });
        let anchor = Anchor::from_value(text).unwrap();
        assert_eq!(
            anchor.extent,
            Some(Extent::Text {
                start_character: 2.0,
                end_character: 9.0,
                text: "anchored".to_string(),
            })
        );

        let image = json!({
            "anchorId": "a2",
            "nodeId": "n1",
            "extent": { "type": "image", "left": 1.0, "top": 2.5, "width": 40, "height": 30 }
        });
        assert!(is_anchor(&image));
    }

    #[test]
    fn text_offsets_take_any_json_number() {
        let fractional = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "text", "startCharacter": 1.5, "endCharacter": -1, "text": "x" }
        });
        let anchor = Anchor::from_value(fractional).unwrap();
        assert_eq!(
            anchor.extent,
            Some(Extent::Text {
                start_character: 1.5,
                end_character: -1.0,
                text: "x".to_string(),
            })
        );

        let textual = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "text", "startCharacter": "1", "endCharacter": 2, "text": "x" }
        });
        assert!(!is_anchor(&textual));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(!is_anchor(&json!({ "anchorId": "a1" })));
        assert!(!is_anchor(&json!({ "nodeId": "n1" })));
        assert!(!is_anchor(&json!({})));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(!is_anchor(&json!({ "anchorId": 7, "nodeId": "n1" })));
        assert!(!is_anchor(&json!({ "anchorId": "a1", "nodeId": ["n1"] })));
        assert!(!is_anchor(&json!("a1")));
        assert!(!is_anchor(&Value::Null));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(!is_anchor(
            &json!({ "anchorId": "a1", "nodeId": "n1", "owner": "someone" })
        ));
    }

    #[test]
    fn rejects_malformed_extent() {
        let unknown_kind = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "video", "start": 0 }
        });
        assert!(!is_anchor(&unknown_kind));

        let missing_text = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "text", "startCharacter": 0, "endCharacter": 3 }
        });
        assert!(!is_anchor(&missing_text));

        let extra_text_key = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": {
                "type": "text",
                "startCharacter": 0,
                "endCharacter": 3,
                "text": "abc",
                "bogus": 1
            }
        });
        assert!(!is_anchor(&extra_text_key));

        let extra_image_key = json!({
            "anchorId": "a1",
            "nodeId": "n1",
            "extent": { "type": "image", "left": 0, "top": 0, "width": 1, "height": 1, "depth": 1 }
        });
        assert!(!is_anchor(&extra_image_key));
    }

    #[test]
    fn serializes_camel_case_without_empty_extent() {
        let value = serde_json::to_value(Anchor::new("a1", "n1")).unwrap();
        assert_eq!(value, json!({ "anchorId": "a1", "nodeId": "n1" }));
    }
}
