use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use collab_system::{Dispatch, WorkspaceSession};

use super::connection::ConnectionCommand;
use crate::connection_tx_storage::ConnectionTxStorage;

/// Unbounded so that connection actors never drop a command, in particular
/// their final `Disconnect`.
pub type ServerTx = UnboundedSender<ConnectionCommand>;

/// Owns the workspace session. Commands are processed one at a time, so a
/// mutation and its fan-out finish before the next command is looked at.
pub struct Server {
    session: WorkspaceSession,
    connections: ConnectionTxStorage,
}

impl Server {
    pub fn new() -> Self {
        Self {
            session: WorkspaceSession::new(),
            connections: ConnectionTxStorage::new(),
        }
    }

    pub fn session(&self) -> &WorkspaceSession {
        &self.session
    }

    pub async fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect {
                connection_id,
                tx,
                username,
            } => {
                self.connections.insert(connection_id, tx);
                log::info!(
                    "Connection {} opened ({} online)",
                    connection_id,
                    self.connections.len()
                );
                let dispatches = self.session.join(connection_id, username.as_deref());
                self.dispatch_all(dispatches).await;
            }
            ConnectionCommand::Disconnect { from } => {
                if self.connections.remove(&from).is_none() {
                    log::warn!("disconnect from unknown connection {}", from);
                }
                let dispatches = self.session.leave(&from);
                self.dispatch_all(dispatches).await;
            }
            ConnectionCommand::ClientEvent { from, event } => {
                let dispatches = self.session.handle(&from, event);
                self.dispatch_all(dispatches).await;
            }
        }
    }

    async fn dispatch_all(&mut self, dispatches: Vec<Dispatch>) {
        for dispatch in dispatches {
            log::debug!("Egress {:?}", dispatch);
            self.connections.dispatch(dispatch).await;
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = unbounded_channel::<ConnectionCommand>();

    tokio::spawn(async move {
        let mut server = Box::new(Server::new());

        while let Some(command) = srv_rx.recv().await {
            server.handle_connection_command(command).await;
        }
        log::info!("server task terminated");
    });

    srv_tx
}
