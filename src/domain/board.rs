use crate::{
    domain::{
        card::Card,
        column::Column,
        id::{Id, IdStrategy},
    },
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tokio::fs;
use tracing::trace;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    pub name: String,
    /// Titles of the columns a fresh board starts with, seeded as ids 1..=n
    pub columns: Vec<String>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Review".to_string(),
                "Done".to_string(),
            ],
            id_strategy: IdStrategy::default(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.name.trim().is_empty() {
            return Err(BoardError::ConfigError("board name is empty".to_string()));
        }
        Ok(config)
    }

    /// Loads a JSON config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BoardError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_json(&contents)
    }
}

/// Kanban board state: ordered columns plus one ordered card sequence.
///
/// Cards of different columns may be interleaved in `cards`; a column's cards
/// are displayed in the order they appear in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
}

impl BoardState {
    pub fn new(columns: Vec<Column>, cards: Vec<Card>) -> Self {
        Self { columns, cards }
    }

    /// Builds the initial board: one column per configured title, no cards
    pub fn from_config(config: &BoardConfig) -> Self {
        let columns = config
            .columns
            .iter()
            .zip(1u64..)
            .map(|(title, id)| Column::new(id, title.as_str()))
            .collect();
        Self::new(columns, Vec::new())
    }

    // -- Selectors --

    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn card(&self, id: &Id) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn column_index(&self, id: &Id) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    /// Position of a card in the full card sequence
    pub fn card_index(&self, id: &Id) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    pub fn column_ids(&self) -> Vec<Id> {
        self.columns.iter().map(|col| col.id.clone()).collect()
    }

    /// Cards of one column in display order
    pub fn cards_in_column<'a>(&'a self, column_id: &'a Id) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |card| card.belongs_to(column_id))
    }

    pub fn active_column(&self) -> Option<&Column> {
        self.columns.iter().find(|col| col.is_active)
    }

    pub fn active_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| card.is_active)
    }

    // -- Column transitions --

    /// Appends a column titled by the current column count, so titles repeat
    /// after a deletion.
    pub fn add_column(&mut self, id: Id) {
        let title = format!("Column {}", self.columns.len() + 1);
        self.columns.push(Column::new(id, title));
    }

    pub fn edit_column(&mut self, id: &Id, title: impl Into<String>) {
        match self.columns.iter_mut().find(|col| &col.id == id) {
            Some(column) => column.title = title.into(),
            None => trace!(%id, "edit_column: no such column"),
        }
    }

    /// Removes the column and every card that references it
    pub fn delete_column(&mut self, id: &Id) {
        self.columns.retain(|col| &col.id != id);
        self.cards.retain(|card| !card.belongs_to(id));
    }

    pub fn set_active_column(&mut self, id: &Id) {
        if self.column(id).is_none() {
            trace!(%id, "set_active_column: no such column");
            return;
        }
        for column in &mut self.columns {
            column.is_active = &column.id == id;
        }
    }

    /// Replaces the column sequence as-is; the caller supplies a permutation
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    // -- Card transitions --

    /// Appends a card to an existing column. The number in the generated text
    /// counts every card on the board, not just the column's.
    pub fn add_card(&mut self, id: Id, column_id: &Id) {
        if self.column(column_id).is_none() {
            trace!(%column_id, "add_card: no such column");
            return;
        }
        let text = format!("Task {}", self.cards.len() + 1);
        self.cards.push(Card::new(id, text, column_id.clone()));
    }

    pub fn edit_card(&mut self, id: &Id, text: impl Into<String>) {
        match self.cards.iter_mut().find(|card| &card.id == id) {
            Some(card) => card.text = text.into(),
            None => trace!(%id, "edit_card: no such card"),
        }
    }

    pub fn delete_card(&mut self, id: &Id) {
        self.cards.retain(|card| &card.id != id);
    }

    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    pub fn set_active_card(&mut self, id: &Id) {
        if self.card(id).is_none() {
            trace!(%id, "set_active_card: no such card");
            return;
        }
        for card in &mut self.cards {
            card.is_active = &card.id == id;
        }
    }

    /// Moves a card into `target_column_id` at `target_index` of the card
    /// sequence.
    ///
    /// `target_index` addresses the full sequence as it was before the move.
    /// The card is removed first and inserted at that same index, so when the
    /// card started ahead of the target it lands one slot further along than
    /// the slot's previous occupant. An index past the end appends. A negative
    /// index counts back from the end of the shortened sequence (`-1` lands
    /// just before the last card) and stops at the front.
    pub fn move_card(&mut self, card_id: &Id, target_column_id: Id, target_index: i64) {
        let Some(source_index) = self.card_index(card_id) else {
            trace!(%card_id, "move_card: no such card");
            return;
        };

        let mut card = self.cards.remove(source_index);
        card.column_id = target_column_id;

        let len = self.cards.len() as i64;
        let index = if target_index < 0 {
            (len + target_index).max(0)
        } else {
            target_index.min(len)
        };
        self.cards.insert(index as usize, card);
    }

    /// Clears every active flag; ends a drag gesture
    pub fn deactivate(&mut self) {
        for card in &mut self.cards {
            card.is_active = false;
        }
        for column in &mut self.columns {
            column.is_active = false;
        }
    }

    // -- Snapshots --

    /// Checks the structural invariants the transitions rely on, including
    /// that a column and a card are never active at the same time
    pub fn validate(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::DuplicateId {
                    kind: "column",
                    id: column.id.to_string(),
                });
            }
        }

        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if !card_ids.insert(&card.id) {
                return Err(BoardError::DuplicateId {
                    kind: "card",
                    id: card.id.to_string(),
                });
            }
            if !column_ids.contains(&card.column_id) {
                return Err(BoardError::DanglingCard {
                    card: card.id.to_string(),
                    column: card.column_id.to_string(),
                });
            }
        }

        if self.columns.iter().filter(|col| col.is_active).count() > 1 {
            return Err(BoardError::MultipleActive("column"));
        }
        if self.cards.iter().filter(|card| card.is_active).count() > 1 {
            return Err(BoardError::MultipleActive("card"));
        }
        if self.active_column().is_some() && self.active_card().is_some() {
            return Err(BoardError::MultipleActive("drag item"));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }
}
