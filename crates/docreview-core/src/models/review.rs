use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reviewer decision. The server only accepts these two labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approved" | "approve" => Ok(ReviewStatus::Approved),
            "rejected" | "reject" => Ok(ReviewStatus::Rejected),
            other => Err(format!(
                "Invalid status '{}'. Must be 'approved' or 'rejected'",
                other
            )),
        }
    }
}

/// Body of `POST /review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub document_id: String,
    pub status: ReviewStatus,
}
