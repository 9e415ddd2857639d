use serde::{Deserialize, Serialize};

/// Domain model đại diện một tin nhắn chat.
///
/// Cùng một struct dùng cho cả ba nơi: payload `send_message` gửi đi,
/// payload `message_received_*` nhận về, và phần tử của lịch sử REST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: String,
    /// None khi gửi trong phòng chung (không có người nhận cố định).
    #[serde(default)]
    pub to: Option<String>,
    pub message: String,
    #[serde(rename = "sendAll", default)]
    pub send_all: bool,
    #[serde(rename = "bgColor", default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Local echo: tin do chính mình gửi, không bao giờ serialize ra wire.
    #[serde(rename = "sendByYou", default, skip_serializing)]
    pub send_by_you: bool,
}

/// Một người dùng trong danh sách liên hệ (từ login và /user-list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}
