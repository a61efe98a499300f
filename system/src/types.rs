use serde::{Deserialize, Serialize};

pub type ConnectionId = uuid::Uuid;
pub type ChatMessageId = uuid::Uuid;
/// Canvas object ids are generated by clients (timestamps or random strings).
pub type ObjectId = String;

pub const SYSTEM_USER_ID: &str = "system";
pub const SYSTEM_USERNAME: &str = "System";
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ConnectionId,
    pub username: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub user_id: String,
    pub username: String,
    pub text: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn from_user(user: &User, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id: user.id.to_string(),
            username: user.username.clone(),
            text,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn notice(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id: SYSTEM_USER_ID.into(),
            username: SYSTEM_USERNAME.into(),
            text,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_notice(&self) -> bool {
        self.user_id == SYSTEM_USER_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Owner as declared by the client. Not checked on update or removal.
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect {
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },
    Circle {
        #[serde(default)]
        radius: f64,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    Line {
        #[serde(default)]
        points: Vec<f64>,
    },
    /// Free-hand stroke, `points` is a flat `[x0, y0, x1, y1, ...]` list.
    Path {
        #[serde(default)]
        points: Vec<f64>,
    },
}

/// Where a client's cursor currently is. Relayed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CursorTarget {
    /// Character offset in the shared code buffer.
    Code { position: u64 },
    Canvas { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPosition {
    pub user_id: ConnectionId,
    pub username: String,
    pub color: String,
    #[serde(flatten)]
    pub target: CursorTarget,
}

impl CursorPosition {
    pub fn of(user: &User, target: CursorTarget) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            color: user.color.clone(),
            target,
        }
    }
}
