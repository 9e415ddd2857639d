use tokio::sync::mpsc;

use crate::common::NetworkCommand;

/// Giữ đầu gửi lệnh xuống socket task và trạng thái kết nối hiện tại.
///
/// Được tạo đúng một lần ở composition root và truyền tham chiếu cho các
/// thành phần cần emit; test thay bằng một kênh mpsc trần, không cần mạng.
pub struct ConnectionManager {
    command_sender: mpsc::Sender<NetworkCommand>,
    connected: bool,
}

impl ConnectionManager {
    pub fn new(command_sender: mpsc::Sender<NetworkCommand>) -> Self {
        Self {
            command_sender,
            connected: false,
        }
    }

    /// Fire-and-forget: đẩy lệnh sang socket task, không chờ xác nhận.
    pub fn emit(&self, command: NetworkCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to network: {err}");
        }
    }

    /// Cập nhật trạng thái kết nối từ event `connect`/`disconnect`.
    /// Mất kết nối chỉ đổi cờ này, không đụng tới phiên hay hội thoại.
    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            log::info!(
                "Socket {}",
                if connected { "connected" } else { "disconnected" }
            );
        }
        self.connected = connected;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
