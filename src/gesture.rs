//! Drag gesture entry points.
//!
//! A pointer gesture reaches the board as three calls: start, any number of
//! hovers, and end. The `plan_*` functions turn each call into the actions it
//! implies for the current state; [`DragController`] feeds those actions to a
//! [`BoardDispatcher`] in gesture order.

use crate::{
    domain::{Action, BoardState, Column, Id},
    error::Result,
    store::BoardDispatcher,
};
use tracing::debug;

/// The thing being dragged, or the thing under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Column(Id),
    Card(Id),
}

impl DragItem {
    pub fn id(&self) -> &Id {
        match self {
            Self::Column(id) | Self::Card(id) => id,
        }
    }
}

/// Marks the dragged item active
pub fn plan_drag_start(active: &DragItem) -> Vec<Action> {
    match active {
        DragItem::Column(id) => vec![Action::SetActiveColumn { id: id.clone() }],
        DragItem::Card(id) => vec![Action::SetActiveCard { id: id.clone() }],
    }
}

/// Relocates a dragged card while it hovers over another card or a column.
///
/// Hovering a card targets that card's slot in the full card sequence.
/// Hovering a column has no card slot to aim at and sends index `-1`, which
/// lands the card just before the last card of the sequence, even when it
/// already sits in that column. Column drags only reorder on drop.
pub fn plan_drag_over(state: &BoardState, active: &DragItem, over: Option<&DragItem>) -> Vec<Action> {
    let (DragItem::Card(card_id), Some(over)) = (active, over) else {
        return Vec::new();
    };
    if card_id == over.id() {
        return Vec::new();
    }
    if state.card(card_id).is_none() {
        return Vec::new();
    }

    match over {
        DragItem::Card(over_id) => {
            let Some(target_index) = state.card_index(over_id) else {
                return Vec::new();
            };
            let target_column_id = state.cards[target_index].column_id.clone();
            vec![Action::MoveCard {
                card_id: card_id.clone(),
                target_column_id,
                target_index: target_index as i64,
            }]
        }
        DragItem::Column(column_id) => {
            if state.column(column_id).is_none() {
                return Vec::new();
            }
            vec![Action::MoveCard {
                card_id: card_id.clone(),
                target_column_id: column_id.clone(),
                target_index: -1,
            }]
        }
    }
}

/// Ends the gesture.
///
/// Always deactivates. A column dropped onto another column is then moved to
/// that column's position; a cancelled drop (no target) commits nothing else.
pub fn plan_drag_end(state: &BoardState, active: &DragItem, over: Option<&DragItem>) -> Vec<Action> {
    let mut actions = vec![Action::Deactivate];

    let (DragItem::Column(active_id), Some(DragItem::Column(over_id))) = (active, over) else {
        return actions;
    };
    if active_id == over_id {
        return actions;
    }
    let (Some(from), Some(to)) = (state.column_index(active_id), state.column_index(over_id)) else {
        return actions;
    };

    let columns: Vec<Column> = array_move(&state.columns, from, to)
        .into_iter()
        .map(|mut column| {
            column.is_active = false;
            column
        })
        .collect();
    actions.push(Action::SetColumns { columns });
    actions
}

/// Copy of `items` with the element at `from` moved to `to`
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to.min(moved.len()), item);
    moved
}

/// Drives one dispatcher through drag gestures
pub struct DragController<D> {
    dispatcher: D,
    active: Option<DragItem>,
}

impl<D: BoardDispatcher> DragController<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            active: None,
        }
    }

    /// Item currently being dragged
    pub fn active(&self) -> Option<&DragItem> {
        self.active.as_ref()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn into_dispatcher(self) -> D {
        self.dispatcher
    }

    pub async fn on_drag_start(&mut self, active: DragItem) -> Result<()> {
        debug!(item = %active.id(), "drag start");
        self.dispatch_all(plan_drag_start(&active)).await?;
        self.active = Some(active);
        Ok(())
    }

    pub async fn on_drag_over(&mut self, over: Option<DragItem>) -> Result<()> {
        let Some(active) = self.active.clone() else {
            return Ok(());
        };
        let state = self.dispatcher.snapshot().await?;
        self.dispatch_all(plan_drag_over(&state, &active, over.as_ref()))
            .await
    }

    pub async fn on_drag_end(&mut self, over: Option<DragItem>) -> Result<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        debug!(item = %active.id(), dropped = over.is_some(), "drag end");
        let state = self.dispatcher.snapshot().await?;
        self.dispatch_all(plan_drag_end(&state, &active, over.as_ref()))
            .await
    }

    async fn dispatch_all(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            self.dispatcher.dispatch(action).await?;
        }
        Ok(())
    }
}
