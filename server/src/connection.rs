use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;

use collab_system::uuid::Uuid;
use collab_system::{serde_json, ClientEvent, ConnectionId, ServerEvent};

use crate::config::RelaySettings;
use crate::connection_tx_storage::ConnectionTx;
use crate::server::ServerTx;

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        connection_id: ConnectionId,
        tx: ConnectionTx,
        username: Option<String>,
    },
    Disconnect {
        from: ConnectionId,
    },
    ClientEvent {
        from: ConnectionId,
        event: ClientEvent,
    },
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ServerEvent);

/// The id is allocated before the actor starts, so every command it sends,
/// including the `Disconnect` from `stopping`, can name the connection.
struct ConnectionActor {
    connection_id: ConnectionId,
    srv_tx: ServerTx,
    username: Option<String>,
    outbound_capacity: usize,
}

impl ConnectionActor {
    fn forward(&self, command: ConnectionCommand) {
        if self.srv_tx.send(command).is_err() {
            log::error!(
                "server task is gone, connection {} cannot be served",
                self.connection_id
            );
        }
    }

    /// Undecodable frames are dropped; the connection stays open.
    fn ingress(&self, decoded: serde_json::Result<ClientEvent>) {
        match decoded {
            Ok(event) => {
                log::debug!("Ingress {:?}", event);
                self.forward(ConnectionCommand::ClientEvent {
                    from: self.connection_id,
                    event,
                });
            }
            Err(err) => {
                log::warn!(
                    "dropping undecodable frame from {}: {}",
                    self.connection_id,
                    err
                );
            }
        }
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ServerEvent>(self.outbound_capacity);

        if self
            .srv_tx
            .send(ConnectionCommand::Connect {
                connection_id: self.connection_id,
                tx,
                username: self.username.take(),
            })
            .is_err()
        {
            log::error!("server task is gone, refusing connection");
            ctx.stop();
            return;
        }

        let addr = ctx.address();

        tokio::spawn(async move {
            log::debug!("connection green thread - started");
            while let Some(msg) = rx.recv().await {
                addr.do_send(ConnectionActorMessage(msg));
            }
            log::debug!("connection green thread - terminated");
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.forward(ConnectionCommand::Disconnect {
            from: self.connection_id,
        });

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => {
                log::debug!("Ingress size: {}", text.len());
                self.ingress(serde_json::from_str::<ClientEvent>(&text));
            }
            Ok(ws::Message::Binary(bin)) => {
                log::debug!("Ingress size: {}", bin.len());
                self.ingress(serde_json::from_slice::<ClientEvent>(&bin));
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(err) => {
                log::warn!("websocket protocol error: {}", err);
                ctx.stop();
            }
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        let event = msg.0;
        match serde_json::to_string(&event) {
            Ok(serialized) => ctx.text(serialized),
            Err(err) => log::error!("cannot serialize {:?}: {}", event, err),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    username: Option<String>,
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<ConnectQuery>,
    srv_tx: web::Data<ServerTx>,
    settings: web::Data<RelaySettings>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ConnectionActor {
            connection_id: Uuid::new_v4(),
            srv_tx: srv_tx.get_ref().clone(),
            username: query.into_inner().username,
            outbound_capacity: settings.channel_capacity,
        },
        &req,
        stream,
    )
}
