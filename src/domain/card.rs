use crate::domain::id::Id;
use serde::{Deserialize, Serialize};

/// A task on the board.
///
/// `column_id` is a plain reference; the owning column is looked up through
/// the board, not held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Id,
    pub text: String,
    pub column_id: Id,
    pub is_active: bool,
}

impl Card {
    pub fn new(id: impl Into<Id>, text: impl Into<String>, column_id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            column_id: column_id.into(),
            is_active: false,
        }
    }

    pub fn belongs_to(&self, column_id: &Id) -> bool {
        &self.column_id == column_id
    }
}
