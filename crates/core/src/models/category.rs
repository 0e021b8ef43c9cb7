//! Category record.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: String,
}
