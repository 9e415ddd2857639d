use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::common::{ChatError, NetworkEvent};
use crate::network::RestClient;

/// Truy vấn REST một lần (đăng nhập, danh sách user, lịch sử hội thoại).
///
/// Mỗi truy vấn chạy trên một task riêng và trả kết quả — kể cả thất bại —
/// qua kênh sự kiện chung, nên mọi thay đổi trạng thái diễn ra tuần tự trên
/// luồng UI khi task kết thúc. Không retry, không timeout riêng.
pub struct Loaders {
    runtime: Handle,
    rest: RestClient,
    event_sender: mpsc::Sender<NetworkEvent>,
}

impl Loaders {
    pub fn new(runtime: Handle, rest: RestClient, event_sender: mpsc::Sender<NetworkEvent>) -> Self {
        Self {
            runtime,
            rest,
            event_sender,
        }
    }

    pub fn login(&self, user_name: String, password: String) {
        let rest = self.rest.clone();
        let events = self.event_sender.clone();
        self.runtime.spawn(async move {
            let event = match rest.sign(&user_name, &password).await {
                Ok(user_id) => NetworkEvent::LoginSucceeded { user_id, user_name },
                Err(ChatError::Auth(message)) => NetworkEvent::LoginFailed(message),
                Err(err) => NetworkEvent::LoginFailed(err.to_string()),
            };
            let _ = events.send(event).await;
        });
    }

    pub fn fetch_user_list(&self, self_id: String) {
        let rest = self.rest.clone();
        let events = self.event_sender.clone();
        self.runtime.spawn(async move {
            let event = match rest.user_list(&self_id).await {
                Ok(users) => NetworkEvent::UserListLoaded(users),
                Err(err) => NetworkEvent::UserListFailed(err.to_string()),
            };
            let _ = events.send(event).await;
        });
    }

    pub fn fetch_history(&self, self_id: String, peer_id: String) {
        let rest = self.rest.clone();
        let events = self.event_sender.clone();
        self.runtime.spawn(async move {
            let event = match rest.message_list(&self_id, &peer_id).await {
                Ok(messages) => NetworkEvent::HistoryLoaded { peer_id, messages },
                Err(err) => NetworkEvent::HistoryFailed {
                    peer_id,
                    error: err.to_string(),
                },
            };
            let _ = events.send(event).await;
        });
    }
}
