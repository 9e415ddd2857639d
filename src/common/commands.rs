use serde_json::{Value, json};

use crate::common::types::ChatMessage;

/// Lệnh UI gửi xuống tầng mạng.
///
/// Mỗi variant tương ứng một event đặt tên trên kênh socket; fire-and-forget,
/// không có acknowledgment.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    SendMessage(ChatMessage),
    StartTyping { to: String, from: String },
    EndTyping { to: String, from: String },
    JoinRoom { user_name: String },
    LeaveRoom { user_name: String },
}

impl NetworkCommand {
    /// Tên event trên kênh socket.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::SendMessage(_) => "send_message",
            Self::StartTyping { .. } => "start_typing",
            Self::EndTyping { .. } => "end_typing",
            Self::JoinRoom { .. } => "on_join_room",
            Self::LeaveRoom { .. } => "on_left_room",
        }
    }

    /// Payload JSON kèm theo event.
    pub fn payload(&self) -> Value {
        match self {
            Self::SendMessage(message) => serde_json::to_value(message).unwrap_or(Value::Null),
            Self::StartTyping { to, from } | Self::EndTyping { to, from } => {
                json!({ "to": to, "from": from })
            }
            // Join/leave chỉ mang display name dạng chuỗi trần
            Self::JoinRoom { user_name } | Self::LeaveRoom { user_name } => {
                Value::String(user_name.clone())
            }
        }
    }
}
