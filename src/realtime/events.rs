//! Realtime wire events, sent as JSON text frames of the form `{"event": ..., "data": ...}`.

use serde::{Deserialize, Serialize};

use super::hub::SessionId;

pub const NEW_MEMBER_MESSAGE: &str = "New user joined!";

/// Group ids arrive as either strings or numbers; rooms are keyed by their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "GroupIdRepr")]
pub struct GroupId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum GroupIdRepr {
    Text(String),
    Number(serde_json::Number),
}

impl From<GroupIdRepr> for GroupId {
    fn from(repr: GroupIdRepr) -> Self {
        match repr {
            GroupIdRepr::Text(s) => GroupId(s),
            GroupIdRepr::Number(n) => GroupId(n.to_string()),
        }
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinGroup(GroupId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected { sid: SessionId },
    GroupUpdate { message: String },
}

impl ServerEvent {
    pub fn new_member() -> Self {
        ServerEvent::GroupUpdate {
            message: NEW_MEMBER_MESSAGE.to_string(),
        }
    }
}
