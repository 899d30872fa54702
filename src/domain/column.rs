use crate::domain::id::Id;
use serde::{Deserialize, Serialize};

/// A named lane on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Id,
    pub title: String,
    /// Set while the column is being dragged
    pub is_active: bool,
}

impl Column {
    pub fn new(id: impl Into<Id>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_active: false,
        }
    }
}
