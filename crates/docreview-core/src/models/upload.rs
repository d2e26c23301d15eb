use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DocumentType;

/// Upload entry point. Each one maps to exactly one `DocumentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadCategory {
    Citizenship,
    W2,
}

impl UploadCategory {
    pub fn document_type(&self) -> DocumentType {
        match self {
            UploadCategory::Citizenship => DocumentType::ProofOfCitizenship,
            UploadCategory::W2 => DocumentType::StudentW2,
        }
    }

    /// Identifier of the label annotated after a successful upload.
    pub fn label_id(&self) -> &'static str {
        match self {
            UploadCategory::Citizenship => "citizenshipLabel",
            UploadCategory::W2 => "w2Label",
        }
    }
}

impl fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadCategory::Citizenship => f.write_str("citizenship"),
            UploadCategory::W2 => f.write_str("w2"),
        }
    }
}

impl FromStr for UploadCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "citizenship" => Ok(UploadCategory::Citizenship),
            "w2" => Ok(UploadCategory::W2),
            other => Err(format!(
                "Invalid category '{}'. Must be 'citizenship' or 'w2'",
                other
            )),
        }
    }
}

/// Body of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Whole file, base64 encoded.
    #[serde(rename = "document")]
    pub document_base64: String,
    pub document_type: DocumentType,
    pub student_id: String,
    pub file_name: String,
}

/// Success body of `POST /upload`. Only `score` is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_maps_to_document_type() {
        assert_eq!(
            UploadCategory::Citizenship.document_type(),
            DocumentType::ProofOfCitizenship
        );
        assert_eq!(UploadCategory::W2.document_type(), DocumentType::StudentW2);
    }

    #[test]
    fn test_upload_request_wire_names() {
        let request = UploadRequest {
            document_base64: "aGk=".to_string(),
            document_type: DocumentType::ProofOfCitizenship,
            student_id: "student123".to_string(),
            file_name: "passport.png".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "document": "aGk=",
                "document_type": "Proof of Citizenship",
                "student_id": "student123",
                "file_name": "passport.png"
            })
        );
    }

    #[test]
    fn test_upload_response_ignores_extra_fields() {
        let json = r#"{"message": "Document uploaded successfully", "document_id": "d1", "score": 87}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.score, 87.0);
        assert_eq!(response.document_id.as_deref(), Some("d1"));
    }
}
