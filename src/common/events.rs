use serde_json::Value;

use crate::common::types::{ChatMessage, UserEntry};

/// Một frame đặt tên nhận từ kênh socket, chưa định tuyến.
#[derive(Debug, Clone)]
pub struct ChannelEvent {
    pub name: String,
    pub data: Value,
}

/// Sự kiện từ tầng mạng gửi lên UI.
///
/// Cả socket task lẫn các loader REST đều trả kết quả qua enum này trên cùng
/// một kênh, nên mọi thay đổi trạng thái diễn ra tuần tự trên luồng UI.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    Connected,
    Disconnected,
    Channel(ChannelEvent),
    LoginSucceeded { user_id: String, user_name: String },
    LoginFailed(String),
    UserListLoaded(Vec<UserEntry>),
    UserListFailed(String),
    HistoryLoaded { peer_id: String, messages: Vec<ChatMessage> },
    HistoryFailed { peer_id: String, error: String },
}
