use serde::{Deserialize, Serialize};

/// A user rating of the service. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
