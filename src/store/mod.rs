use crate::{
    domain::{Action, BoardConfig, BoardState, IdGenerator},
    error::Result,
};
use async_trait::async_trait;
use tracing::debug;

pub mod handle;

pub use handle::BoardHandle;

/// Dispatch surface shared by the owned store and the task-backed handle
#[async_trait]
pub trait BoardDispatcher: Send + Sync {
    /// Applies an action; it is visible to `snapshot` once this returns
    async fn dispatch(&mut self, action: Action) -> Result<()>;

    /// Returns the current board state
    async fn snapshot(&self) -> Result<BoardState>;
}

/// Owns the board state and applies actions to it in dispatch order
pub struct BoardStore {
    state: BoardState,
    ids: Box<dyn IdGenerator>,
    revision: u64,
}

impl BoardStore {
    /// Creates a store seeded from the config
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            state: BoardState::from_config(config),
            ids: config.id_strategy.generator(),
            revision: 0,
        }
    }

    pub fn with_state(state: BoardState, ids: impl IdGenerator + 'static) -> Self {
        Self {
            state,
            ids: Box::new(ids),
            revision: 0,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }

    /// Number of actions applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = %action, revision = self.revision + 1, "dispatch");
        self.state.apply(action, &mut *self.ids);
        self.revision += 1;
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

#[async_trait]
impl BoardDispatcher for BoardStore {
    async fn dispatch(&mut self, action: Action) -> Result<()> {
        BoardStore::dispatch(self, action);
        Ok(())
    }

    async fn snapshot(&self) -> Result<BoardState> {
        Ok(self.state.clone())
    }
}
