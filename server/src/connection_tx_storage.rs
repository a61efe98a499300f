use collab_system::{ConnectionId, Dispatch, ServerEvent};
use std::collections::HashMap;

pub type ConnectionTx = tokio::sync::mpsc::Sender<ServerEvent>;

pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connection_txs.len()
    }

    pub async fn send(&mut self, to: &ConnectionId, message: ServerEvent) {
        if let Some(tx) = self.connection_txs.get_mut(to) {
            if tx.send(message).await.is_err() {
                log::warn!("connection {} is gone, dropping event", to);
            }
        } else {
            log::warn!("no such connection: {}", to);
        }
    }

    /// Sends the event to every stored connection the audience includes.
    pub async fn dispatch(&mut self, dispatch: Dispatch) {
        let targets = self
            .connection_txs
            .keys()
            .filter(|id| dispatch.audience.includes(id))
            .cloned()
            .collect::<Vec<_>>();
        for connection_id in targets {
            self.send(&connection_id, dispatch.event.clone()).await;
        }
    }
}
