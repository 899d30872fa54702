pub mod action;
pub mod board;
pub mod card;
pub mod column;
pub mod id;

pub use action::{reduce, Action};
pub use board::{BoardConfig, BoardState};
pub use card::Card;
pub use column::Column;
pub use id::{
    Id, IdGenerator, IdStrategy, SequentialIdGenerator, TimestampIdGenerator, UuidIdGenerator,
};
