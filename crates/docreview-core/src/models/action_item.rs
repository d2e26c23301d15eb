use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a document was uploaded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Proof of Citizenship")]
    ProofOfCitizenship,
    #[serde(rename = "Student W2")]
    StudentW2,
}

impl DocumentType {
    /// Label used on the wire and in the review header.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::ProofOfCitizenship => "Proof of Citizenship",
            DocumentType::StudentW2 => "Student W2",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document awaiting reviewer approval, as reported by `GET /action-items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub document_id: String,
    pub document_type: DocumentType,
    pub score: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_item_from_server_json() {
        let json = r#"{
            "document_id": "6f1c",
            "document_type": "Student W2",
            "student_id": "student123",
            "score": 7
        }"#;
        let item: ActionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.document_id, "6f1c");
        assert_eq!(item.document_type, DocumentType::StudentW2);
        assert_eq!(item.score, 7.0);
        assert_eq!(item.explanation, "");
        assert_eq!(item.student_id.as_deref(), Some("student123"));
    }

    #[test]
    fn test_action_item_list_preserves_order() {
        let json = r#"[
            {"document_id": "b", "document_type": "Proof of Citizenship", "score": 3, "explanation": "blurry"},
            {"document_id": "a", "document_type": "Student W2", "score": 9, "explanation": "ok"}
        ]"#;
        let items: Vec<ActionItem> = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.document_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(items[0].explanation, "blurry");
    }

    #[test]
    fn test_document_type_labels() {
        assert_eq!(
            serde_json::to_string(&DocumentType::ProofOfCitizenship).unwrap(),
            "\"Proof of Citizenship\""
        );
        assert_eq!(DocumentType::StudentW2.to_string(), "Student W2");
    }

    #[test]
    fn test_unknown_document_type_rejected() {
        let json = r#"{"document_id": "x", "document_type": "Passport", "score": 1}"#;
        assert!(serde_json::from_str::<ActionItem>(json).is_err());
    }
}
