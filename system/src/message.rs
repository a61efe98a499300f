use crate::types::*;
use serde::{Deserialize, Serialize};

/// Frames sent by a client. On the wire: `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    CodeUpdate(String),
    LanguageChange(String),
    CodeExecutionResult(String),
    CursorPosition(CursorTarget),
    CanvasObjectAdded(CanvasObject),
    CanvasObjectUpdated(CanvasObject),
    CanvasObjectRemoved(ObjectId),
    CanvasCleared,
    ChatMessage(ChatMessageDraft),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDraft {
    #[serde(default)]
    pub text: String,
}

/// Frames sent by the server, same envelope as [`ClientEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected(User),
    Users(Vec<User>),
    CodeUpdate(String),
    LanguageChange(String),
    CodeExecutionResult(String),
    CanvasUpdate(Vec<CanvasObject>),
    CanvasObjectAdded(CanvasObject),
    CanvasObjectUpdated(CanvasObject),
    CanvasObjectRemoved(ObjectId),
    ChatMessage(ChatMessage),
    ChatMessages(Vec<ChatMessage>),
    CursorPositions(Vec<CursorPosition>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Only(ConnectionId),
    Except(ConnectionId),
    Everyone,
}

impl Audience {
    pub fn includes(&self, connection_id: &ConnectionId) -> bool {
        match self {
            Audience::Only(id) => id == connection_id,
            Audience::Except(id) => id != connection_id,
            Audience::Everyone => true,
        }
    }
}

/// An event together with the connections that should receive it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub audience: Audience,
    pub event: ServerEvent,
}

impl Dispatch {
    pub fn only(to: ConnectionId, event: ServerEvent) -> Self {
        Self {
            audience: Audience::Only(to),
            event,
        }
    }

    pub fn except(from: ConnectionId, event: ServerEvent) -> Self {
        Self {
            audience: Audience::Except(from),
            event,
        }
    }

    pub fn everyone(event: ServerEvent) -> Self {
        Self {
            audience: Audience::Everyone,
            event,
        }
    }
}

/// Everything a newly connected client needs to catch up.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub users: Vec<User>,
    pub code: String,
    pub language: String,
    pub canvas_objects: Vec<CanvasObject>,
    pub chat_messages: Vec<ChatMessage>,
    pub last_execution_result: String,
}

impl SessionSnapshot {
    pub fn into_events(self) -> Vec<ServerEvent> {
        let mut events = vec![
            ServerEvent::Users(self.users),
            ServerEvent::CodeUpdate(self.code),
            ServerEvent::LanguageChange(self.language),
            ServerEvent::CanvasUpdate(self.canvas_objects),
            ServerEvent::ChatMessages(self.chat_messages),
        ];
        if !self.last_execution_result.is_empty() {
            events.push(ServerEvent::CodeExecutionResult(
                self.last_execution_result,
            ));
        }
        events
    }
}
