use crate::{
    domain::{Action, BoardState},
    error::{BoardError, Result},
    store::{BoardDispatcher, BoardStore},
};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 64;

enum Command {
    Dispatch {
        action: Action,
        ack: oneshot::Sender<u64>,
    },
    Shutdown {
        ack: oneshot::Sender<BoardState>,
    },
}

/// Cloneable handle to a [`BoardStore`] running on its own tokio task.
///
/// All clones feed one channel, so actions apply in the order they are sent.
/// Every applied action publishes a fresh snapshot to subscribers. The task
/// stops once every handle is dropped or [`BoardHandle::shutdown`] is called.
#[derive(Clone)]
pub struct BoardHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<BoardState>,
}

impl BoardHandle {
    /// Moves the store onto a new task. Must be called inside a tokio runtime.
    pub fn spawn(store: BoardStore) -> Self {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, state) = watch::channel(store.state().clone());

        tokio::spawn(run(store, receiver, publisher));

        Self { commands, state }
    }

    /// Applies an action and returns the store revision it produced
    pub async fn dispatch(&self, action: Action) -> Result<u64> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { action, ack })
            .await
            .map_err(|_| BoardError::StoreClosed)?;
        applied.await.map_err(|_| BoardError::StoreClosed)
    }

    /// Latest published state
    pub fn state(&self) -> BoardState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every applied action
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.clone()
    }

    /// Stops the task and returns the final state. Other clones get
    /// [`BoardError::StoreClosed`] from then on.
    pub async fn shutdown(self) -> Result<BoardState> {
        let (ack, stopped) = oneshot::channel();
        self.commands
            .send(Command::Shutdown { ack })
            .await
            .map_err(|_| BoardError::StoreClosed)?;
        stopped.await.map_err(|_| BoardError::StoreClosed)
    }
}

async fn run(
    mut store: BoardStore,
    mut commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<BoardState>,
) {
    info!("board store started");

    while let Some(command) = commands.recv().await {
        match command {
            Command::Dispatch { action, ack } => {
                store.dispatch(action);
                publisher.send_replace(store.state().clone());
                if ack.send(store.revision()).is_err() {
                    debug!("dispatch caller went away before the ack");
                }
            }
            Command::Shutdown { ack } => {
                info!(revision = store.revision(), "board store shutting down");
                if ack.send(store.into_state()).is_err() {
                    debug!("shutdown caller went away before the final state");
                }
                return;
            }
        }
    }

    info!(revision = store.revision(), "board store stopped, all handles dropped");
}

#[async_trait]
impl BoardDispatcher for BoardHandle {
    async fn dispatch(&mut self, action: Action) -> Result<()> {
        BoardHandle::dispatch(self, action).await.map(|_| ())
    }

    async fn snapshot(&self) -> Result<BoardState> {
        Ok(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BoardConfig, Card, Column, Id, SequentialIdGenerator},
        gesture::{DragController, DragItem},
    };

    fn sample_store() -> BoardStore {
        BoardStore::with_state(
            BoardState::new(
                vec![Column::new(1, "To Do"), Column::new(2, "Doing")],
                vec![
                    Card::new("a", "x", 1),
                    Card::new("b", "y", 1),
                    Card::new("c", "z", 2),
                ],
            ),
            SequentialIdGenerator::new("n"),
        )
    }

    #[tokio::test]
    async fn test_dispatch_is_visible_on_return() {
        let handle = BoardHandle::spawn(sample_store());

        let revision = handle
            .dispatch(Action::MoveCard {
                card_id: Id::from("a"),
                target_column_id: Id::Int(2),
                target_index: 2,
            })
            .await
            .unwrap();

        assert_eq!(revision, 1);
        let order: Vec<String> = handle.state().cards.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_clones_share_one_order() {
        let handle = BoardHandle::spawn(BoardStore::new(&BoardConfig::default()));
        let other = handle.clone();

        handle.dispatch(Action::AddColumn).await.unwrap();
        other.dispatch(Action::AddColumn).await.unwrap();
        let revision = handle.dispatch(Action::DeleteColumn { id: Id::Int(1) }).await.unwrap();

        assert_eq!(revision, 3);
        let titles: Vec<String> = other.state().columns.into_iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec!["In Progress", "Review", "Done", "Column 5", "Column 6"]
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let handle = BoardHandle::spawn(sample_store());
        let mut updates = handle.subscribe();

        handle
            .dispatch(Action::SetActiveColumn { id: Id::Int(2) })
            .await
            .unwrap();

        updates.changed().await.unwrap();
        let state = updates.borrow_and_update().clone();
        assert_eq!(state.active_column().map(|c| &c.id), Some(&Id::Int(2)));
    }

    #[tokio::test]
    async fn test_shutdown_closes_clones() {
        let handle = BoardHandle::spawn(sample_store());
        let other = handle.clone();

        handle.dispatch(Action::DeleteCard { id: Id::from("b") }).await.unwrap();
        let final_state = handle.shutdown().await.unwrap();
        assert_eq!(final_state.cards.len(), 2);

        let result = other.dispatch(Action::Deactivate).await;
        assert!(matches!(result, Err(BoardError::StoreClosed)));
    }

    #[tokio::test]
    async fn test_shutdown_without_waiting_caller_still_stops() {
        let handle = BoardHandle::spawn(sample_store());
        let (ack, stopped) = oneshot::channel();
        drop(stopped);

        let sent = handle.commands.send(Command::Shutdown { ack }).await;
        assert!(sent.is_ok());

        let result = handle.dispatch(Action::Deactivate).await;
        assert!(matches!(result, Err(BoardError::StoreClosed)));
    }

    #[tokio::test]
    async fn test_drag_controller_over_handle() {
        let handle = BoardHandle::spawn(sample_store());
        let mut controller = DragController::new(handle.clone());

        controller
            .on_drag_start(DragItem::Column(Id::Int(1)))
            .await
            .unwrap();
        assert!(handle.state().columns[0].is_active);

        controller
            .on_drag_end(Some(DragItem::Column(Id::Int(2))))
            .await
            .unwrap();

        let state = handle.state();
        assert_eq!(state.column_ids(), vec![Id::Int(2), Id::Int(1)]);
        assert!(state.columns.iter().all(|c| !c.is_active));
        assert_eq!(state.cards.len(), 3);
    }
}
