use crate::message::*;
use crate::palette::random_color;
use crate::types::*;

pub const INITIAL_CODE: &str = "// Start typing your code here...";
pub const INITIAL_LANGUAGE: &str = "javascript";

/// The single shared workspace: code buffer, canvas, chat and roster.
///
/// Every operation mutates state first and then returns the events to fan out.
/// Conflicting edits are resolved by arrival order (last write wins).
#[derive(Debug, Clone)]
pub struct WorkspaceSession {
    code: String,
    language: String,
    canvas_objects: Vec<CanvasObject>,
    chat_messages: Vec<ChatMessage>,
    users: Vec<User>,
    last_execution_result: String,
}

impl Default for WorkspaceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceSession {
    pub fn new() -> Self {
        Self {
            code: INITIAL_CODE.into(),
            language: INITIAL_LANGUAGE.into(),
            canvas_objects: Vec::new(),
            chat_messages: Vec::new(),
            users: Vec::new(),
            last_execution_result: String::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn canvas_objects(&self) -> &[CanvasObject] {
        &self.canvas_objects
    }

    pub fn chat_messages(&self) -> &[ChatMessage] {
        &self.chat_messages
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn last_execution_result(&self) -> &str {
        &self.last_execution_result
    }

    pub fn user(&self, connection_id: &ConnectionId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == connection_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            users: self.users.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            canvas_objects: self.canvas_objects.clone(),
            chat_messages: self.chat_messages.clone(),
            last_execution_result: self.last_execution_result.clone(),
        }
    }

    /// Registers a user with a random palette color.
    pub fn join(&mut self, connection_id: ConnectionId, username: Option<&str>) -> Vec<Dispatch> {
        let username = match username.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => ANONYMOUS_USERNAME.to_owned(),
        };
        self.join_as(User {
            id: connection_id,
            username,
            color: random_color().to_owned(),
        })
    }

    pub fn join_as(&mut self, user: User) -> Vec<Dispatch> {
        let connection_id = user.id;
        let notice = ChatMessage::notice(format!("{} joined the workspace", user.username));
        log::info!("{} ({}) joined the workspace", user.username, connection_id);

        self.users.retain(|u| u.id != connection_id);
        self.users.push(user.clone());

        let mut dispatches = vec![Dispatch::only(connection_id, ServerEvent::Connected(user))];
        dispatches.extend(
            self.snapshot()
                .into_events()
                .into_iter()
                .map(|event| Dispatch::only(connection_id, event)),
        );
        dispatches.push(Dispatch::except(
            connection_id,
            ServerEvent::Users(self.users.clone()),
        ));
        dispatches.push(Dispatch::except(
            connection_id,
            ServerEvent::ChatMessage(notice),
        ));
        dispatches
    }

    /// Unknown connections are ignored.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Vec<Dispatch> {
        let index = match self.users.iter().position(|u| &u.id == connection_id) {
            Some(index) => index,
            None => return Vec::new(),
        };
        let user = self.users.remove(index);
        log::info!("{} ({}) left the workspace", user.username, connection_id);

        vec![
            Dispatch::except(*connection_id, ServerEvent::Users(self.users.clone())),
            Dispatch::except(
                *connection_id,
                ServerEvent::ChatMessage(ChatMessage::notice(format!(
                    "{} left the workspace",
                    user.username
                ))),
            ),
        ]
    }

    pub fn handle(&mut self, from: &ConnectionId, event: ClientEvent) -> Vec<Dispatch> {
        let from = *from;
        match event {
            ClientEvent::CodeUpdate(code) => {
                self.code = code.clone();
                vec![Dispatch::except(from, ServerEvent::CodeUpdate(code))]
            }
            ClientEvent::LanguageChange(language) => {
                self.language = language.clone();
                vec![Dispatch::except(from, ServerEvent::LanguageChange(language))]
            }
            ClientEvent::CodeExecutionResult(result) => {
                self.last_execution_result = result.clone();
                vec![Dispatch::except(
                    from,
                    ServerEvent::CodeExecutionResult(result),
                )]
            }
            ClientEvent::CursorPosition(target) => match self.user(&from) {
                Some(user) => vec![Dispatch::except(
                    from,
                    ServerEvent::CursorPositions(vec![CursorPosition::of(user, target)]),
                )],
                None => {
                    log::warn!("cursor position from unknown connection {}", from);
                    Vec::new()
                }
            },
            ClientEvent::CanvasObjectAdded(object) => {
                if self.canvas_objects.iter().any(|o| o.id == object.id) {
                    log::warn!("ignoring canvas object with duplicate id {}", object.id);
                    return Vec::new();
                }
                self.canvas_objects.push(object.clone());
                vec![Dispatch::except(from, ServerEvent::CanvasObjectAdded(object))]
            }
            ClientEvent::CanvasObjectUpdated(object) => {
                match self.canvas_objects.iter_mut().find(|o| o.id == object.id) {
                    Some(existing) => {
                        *existing = object.clone();
                        vec![Dispatch::except(
                            from,
                            ServerEvent::CanvasObjectUpdated(object),
                        )]
                    }
                    None => Vec::new(),
                }
            }
            ClientEvent::CanvasObjectRemoved(object_id) => {
                let before = self.canvas_objects.len();
                self.canvas_objects.retain(|o| o.id != object_id);
                if self.canvas_objects.len() == before {
                    return Vec::new();
                }
                vec![Dispatch::except(
                    from,
                    ServerEvent::CanvasObjectRemoved(object_id),
                )]
            }
            ClientEvent::CanvasCleared => {
                self.canvas_objects.clear();
                vec![Dispatch::everyone(ServerEvent::CanvasUpdate(Vec::new()))]
            }
            ClientEvent::ChatMessage(draft) => match self.user(&from) {
                Some(user) => {
                    let message = ChatMessage::from_user(user, draft.text);
                    self.chat_messages.push(message.clone());
                    vec![Dispatch::everyone(ServerEvent::ChatMessage(message))]
                }
                None => {
                    log::warn!("chat message from unknown connection {}", from);
                    Vec::new()
                }
            },
        }
    }
}
