use std::time::Duration;

use actix_web::web::Bytes;
use actix_web::{test, App};
use awc::error::WsProtocolError;
use awc::ws::{Frame, Message};
use futures::{Sink, SinkExt, Stream, StreamExt};

use collab_server::config::{ExecutionSettings, RelaySettings};
use collab_server::handlers::root;
use collab_server::server::spawn_server;
use collab_system::serde_json::{self, json, Value};
use collab_system::ServerEvent;

fn start_relay() -> test::TestServer {
    let srv_tx = spawn_server();
    test::start(move || {
        App::new()
            .data(srv_tx.clone())
            .data(RelaySettings {
                channel_capacity: 64,
            })
            .data(ExecutionSettings {
                delay: Duration::from_millis(0),
            })
            .configure(root)
    })
}

async fn recv_frame<S>(conn: &mut S) -> Frame
where
    S: Stream<Item = Result<Frame, WsProtocolError>> + Unpin,
{
    match tokio::time::timeout(Duration::from_secs(5), conn.next())
        .await
        .expect("timed out waiting for a frame")
    {
        Some(Ok(frame)) => frame,
        other => panic!("connection ended: {:?}", other),
    }
}

async fn wait_for<S, F>(conn: &mut S, wanted: F) -> ServerEvent
where
    S: Stream<Item = Result<Frame, WsProtocolError>> + Unpin,
    F: Fn(&ServerEvent) -> bool,
{
    loop {
        if let Frame::Text(bytes) = recv_frame(conn).await {
            let event: ServerEvent =
                serde_json::from_slice(&bytes).expect("server sends decodable events");
            if wanted(&event) {
                return event;
            }
        }
    }
}

async fn connected<S>(conn: &mut S) -> String
where
    S: Stream<Item = Result<Frame, WsProtocolError>> + Unpin,
{
    match wait_for(conn, |e| matches!(e, ServerEvent::Connected(_))).await {
        ServerEvent::Connected(user) => user.username,
        _ => unreachable!(),
    }
}

async fn send_json<S>(conn: &mut S, value: Value)
where
    S: Sink<Message, Error = WsProtocolError> + Unpin,
{
    conn.send(Message::Text(value.to_string()))
        .await
        .expect("frame must be sent");
}

#[actix_rt::test]
async fn it_names_users_from_the_query_string() {
    let mut srv = start_relay();

    let mut kim = srv.ws_at("/ws/?username=kim").await.expect("");
    assert_eq!(connected(&mut kim).await, "kim");

    let mut nameless = srv.ws_at("/ws").await.expect("");
    assert_eq!(connected(&mut nameless).await, "Anonymous");
}

#[actix_rt::test]
async fn it_decodes_text_and_binary_frames() {
    let mut srv = start_relay();
    let mut a = srv.ws_at("/ws/?username=a").await.expect("");
    connected(&mut a).await;
    let mut b = srv.ws_at("/ws/?username=b").await.expect("");
    connected(&mut b).await;

    send_json(&mut a, json!({ "event": "code_update", "data": "print(1)" })).await;
    wait_for(&mut b, |e| *e == ServerEvent::CodeUpdate("print(1)".into())).await;

    let frame = json!({ "event": "language_change", "data": "python" }).to_string();
    a.send(Message::Binary(Bytes::from(frame)))
        .await
        .expect("");
    wait_for(&mut b, |e| *e == ServerEvent::LanguageChange("python".into())).await;
}

#[actix_rt::test]
async fn it_answers_pings() {
    let mut srv = start_relay();
    let mut conn = srv.ws_at("/ws/?username=kim").await.expect("");

    conn.send(Message::Ping(Bytes::from_static(b"are you there")))
        .await
        .expect("");
    loop {
        if let Frame::Pong(payload) = recv_frame(&mut conn).await {
            assert_eq!(&payload[..], b"are you there");
            break;
        }
    }
}

#[actix_rt::test]
async fn undecodable_frames_do_not_close_the_connection() {
    let mut srv = start_relay();
    let mut conn = srv.ws_at("/ws/?username=kim").await.expect("");
    connected(&mut conn).await;

    conn.send(Message::Text("not json".into())).await.expect("");
    send_json(
        &mut conn,
        json!({ "event": "canvas_object_added", "data": { "x": 1 } }),
    )
    .await;
    send_json(&mut conn, json!({ "event": "chat_message", "data": "bare string" })).await;
    send_json(
        &mut conn,
        json!({ "event": "chat_message", "data": { "text": "still here" } }),
    )
    .await;

    wait_for(&mut conn, |e| {
        matches!(e, ServerEvent::ChatMessage(m) if m.text == "still here")
    })
    .await;
}

#[actix_rt::test]
async fn closing_announces_the_departure() {
    let mut srv = start_relay();
    let mut a = srv.ws_at("/ws/?username=a").await.expect("");
    connected(&mut a).await;
    let mut b = srv.ws_at("/ws/?username=b").await.expect("");
    connected(&mut b).await;

    a.send(Message::Close(None)).await.expect("");

    wait_for(&mut b, |e| {
        matches!(e, ServerEvent::ChatMessage(m) if m.text == "a left the workspace")
    })
    .await;
}

#[actix_rt::test]
async fn connections_closed_right_away_leave_no_ghost() {
    let mut srv = start_relay();

    let mut ghost = srv.ws_at("/ws/?username=ghost").await.expect("");
    ghost.send(Message::Text("not json".into())).await.expect("");
    ghost.send(Message::Close(None)).await.expect("");
    drop(ghost);

    let mut late = srv.ws_at("/ws/?username=late").await.expect("");
    wait_for(&mut late, |e| match e {
        ServerEvent::Users(users) => {
            users.len() == 1 && users[0].username == "late"
        }
        _ => false,
    })
    .await;
}
