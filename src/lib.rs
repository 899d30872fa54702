//! # Board Core
//!
//! State store for a drag-and-drop kanban board.
//!
//! The board holds an ordered list of columns and one ordered card sequence.
//! Every mutation is an [`Action`] applied synchronously to a [`BoardState`];
//! lookups that find nothing leave the board unchanged instead of failing.
//! Pointer gestures map onto actions through the [`gesture`] entry points, and
//! a store can run in place ([`BoardStore`]) or on its own tokio task
//! ([`BoardHandle`]).

pub mod domain;
pub mod error;
pub mod gesture;
pub mod store;

// Re-export commonly used types
pub use domain::{
    action::{reduce, Action},
    board::{BoardConfig, BoardState},
    card::Card,
    column::Column,
    id::{Id, IdGenerator, IdStrategy},
};
pub use error::{BoardError, Result};
pub use gesture::{DragController, DragItem};
pub use store::{BoardDispatcher, BoardHandle, BoardStore};
