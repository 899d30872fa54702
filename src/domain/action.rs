use crate::domain::{
    board::BoardState,
    card::Card,
    column::Column,
    id::{Id, IdGenerator},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every mutation the board accepts.
///
/// Serialized with a `type` tag (`{"type":"moveCard","cardId":...}`) so a
/// presentation layer can send actions as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    AddColumn,
    EditColumn { id: Id, title: String },
    DeleteColumn { id: Id },
    SetActiveColumn { id: Id },
    SetColumns { columns: Vec<Column> },
    AddCard { column_id: Id },
    EditCard { id: Id, text: String },
    DeleteCard { id: Id },
    SetCards { cards: Vec<Card> },
    SetActiveCard { id: Id },
    MoveCard {
        card_id: Id,
        target_column_id: Id,
        /// Position in the full card sequence; negative counts from the end
        target_index: i64,
    },
    Deactivate,
}

impl Action {
    /// Action name as the presentation layer knows it
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddColumn => "addColumn",
            Self::EditColumn { .. } => "editColumn",
            Self::DeleteColumn { .. } => "deleteColumn",
            Self::SetActiveColumn { .. } => "setActiveColumn",
            Self::SetColumns { .. } => "setColumns",
            Self::AddCard { .. } => "addCard",
            Self::EditCard { .. } => "editCard",
            Self::DeleteCard { .. } => "deleteCard",
            Self::SetCards { .. } => "setCards",
            Self::SetActiveCard { .. } => "setActiveCard",
            Self::MoveCard { .. } => "moveCard",
            Self::Deactivate => "deactivate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BoardState {
    /// Applies one action in place. Unknown ids leave the board untouched.
    pub fn apply(&mut self, action: Action, ids: &mut dyn IdGenerator) {
        match action {
            Action::AddColumn => self.add_column(ids.next_id()),
            Action::EditColumn { id, title } => self.edit_column(&id, title),
            Action::DeleteColumn { id } => self.delete_column(&id),
            Action::SetActiveColumn { id } => self.set_active_column(&id),
            Action::SetColumns { columns } => self.set_columns(columns),
            Action::AddCard { column_id } => {
                // Only spend an id when the card will actually be created
                if self.column(&column_id).is_some() {
                    self.add_card(ids.next_id(), &column_id);
                }
            }
            Action::EditCard { id, text } => self.edit_card(&id, text),
            Action::DeleteCard { id } => self.delete_card(&id),
            Action::SetCards { cards } => self.set_cards(cards),
            Action::SetActiveCard { id } => self.set_active_card(&id),
            Action::MoveCard {
                card_id,
                target_column_id,
                target_index,
            } => self.move_card(&card_id, target_column_id, target_index),
            Action::Deactivate => self.deactivate(),
        }
    }
}

/// By-value form of [`BoardState::apply`]
pub fn reduce(mut state: BoardState, action: Action, ids: &mut dyn IdGenerator) -> BoardState {
    state.apply(action, ids);
    state
}
