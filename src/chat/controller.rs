use chrono::{DateTime, Utc};
use rand::Rng;

use crate::common::{ChatMessage, NetworkCommand, NetworkEvent, UserEntry};
use crate::network::ConnectionManager;
use crate::session::{IdentitySession, RoutedEvent, SubscriptionRegistry};
use crate::storage::session_file::{self, StoredIdentity};

use super::dispatcher::MessageDispatcher;
use super::loaders::Loaders;
use super::roster::RoomMembershipTracker;
use super::typing::{TypingIndicatorTimer, TypingSignal};

/// Bộ não phía client: nhận intent từ UI và sự kiện từ tầng mạng, điều khiển
/// phiên, hội thoại, typing và roster. Không render gì — UI chỉ đọc trạng
/// thái từ đây.
pub struct ChatController {
    connection: ConnectionManager,
    loaders: Loaders,
    session: IdentitySession,
    registry: SubscriptionRegistry,
    dispatcher: MessageDispatcher,
    typing: TypingIndicatorTimer,
    roster: RoomMembershipTracker,
    users: Vec<UserEntry>,
    error_line: Option<String>,
    /// Đường dẫn file phiên để ghi sau đăng nhập; None = không ghi (test).
    session_file: Option<String>,
}

impl ChatController {
    pub fn new(
        connection: ConnectionManager,
        loaders: Loaders,
        session_file: Option<String>,
    ) -> Self {
        Self {
            connection,
            loaders,
            session: IdentitySession::new(),
            registry: SubscriptionRegistry::new(),
            dispatcher: MessageDispatcher::new(),
            typing: TypingIndicatorTimer::new(),
            roster: RoomMembershipTracker::new(),
            users: Vec::new(),
            error_line: None,
            session_file,
        }
    }

    /// Khôi phục phiên đã lưu: vào thẳng Authenticated, không gọi /sign.
    pub fn restore_identity(&mut self, stored: Option<StoredIdentity>) {
        let Some(stored) = stored else { return };
        log::info!("Restoring session for {}", stored.user_name);
        self.session.login(stored.user_id, stored.user_name);
        self.registry.sync(&self.session);
        if let Some(self_id) = self.session.self_id() {
            self.loaders.fetch_user_list(self_id.to_owned());
        }
    }

    /// Đăng nhập qua REST; kết quả quay lại dưới dạng NetworkEvent.
    pub fn login(&mut self, user_name: &str, password: &str) {
        // form cũ không submit khi thiếu một trong hai ô
        if user_name.is_empty() || password.is_empty() {
            return;
        }
        self.loaders.login(user_name.to_owned(), password.to_owned());
    }

    /// Chọn người nhận 1-1. Chọn lại đúng peer đang mở là no-op; đổi peer thì
    /// rebind khóa typing, bỏ hội thoại cũ và nạp lịch sử mới.
    pub fn select_peer(&mut self, peer_id: &str) {
        let Some(peer) = self.users.iter().find(|user| user.id == peer_id).cloned() else {
            log::warn!("select_peer for unknown id {peer_id}; ignored");
            return;
        };
        if !self.session.select_peer(peer) {
            return;
        }

        self.registry.sync(&self.session);
        self.typing = TypingIndicatorTimer::new();
        self.dispatcher.begin_history_load();
        if let (Some(self_id), Some(peer)) = (self.session.self_id(), self.session.peer()) {
            self.loaders
                .fetch_history(self_id.to_owned(), peer.id.clone());
        }
    }

    /// Vào phòng chung với màu ngẫu nhiên.
    pub fn join_room(&mut self) {
        self.join_room_with(&mut rand::thread_rng());
    }

    /// Biến thể tiêm RNG để test chọn màu tất định.
    pub fn join_room_with<R: Rng>(&mut self, rng: &mut R) {
        if !self.session.join_room(rng) {
            return;
        }
        self.registry.sync(&self.session);
        self.dispatcher.reset();
        self.connection.emit(NetworkCommand::JoinRoom {
            user_name: self.session.user_name().to_owned(),
        });
    }

    /// Theo dõi ô nhập: phát start/end_typing đúng tại biên chuyển, và chỉ
    /// khi đang trong hội thoại 1-1.
    pub fn set_draft(&mut self, draft: &str) {
        let Some(signal) = self.typing.observe_draft(draft) else {
            return;
        };
        let (Some(self_id), Some(peer)) = (self.session.self_id(), self.session.peer()) else {
            return;
        };

        let command = match signal {
            TypingSignal::Started => NetworkCommand::StartTyping {
                to: peer.id.clone(),
                from: self_id.to_owned(),
            },
            TypingSignal::Stopped => NetworkCommand::EndTyping {
                to: peer.id.clone(),
                from: self_id.to_owned(),
            },
        };
        self.connection.emit(command);
    }

    /// Gửi nội dung hiện tại. Thành công thì dọn ô nhập (qua đường biên gõ
    /// phím bình thường, nên peer nhận được end_typing); thất bại thì hiện
    /// lỗi inline và không đổi gì khác.
    pub fn send_message(&mut self, body: &str) -> bool {
        match self.dispatcher.send(&self.session, &self.connection, body) {
            Ok(()) => {
                self.error_line = None;
                self.set_draft("");
                true
            }
            Err(err) => {
                self.error_line = Some(err.to_string());
                false
            }
        }
    }

    /// Áp dụng một sự kiện từ tầng mạng (socket hoặc loader REST).
    pub fn handle_event(&mut self, event: NetworkEvent, now: DateTime<Utc>) {
        match event {
            NetworkEvent::Connected => self.connection.set_connected(true),
            NetworkEvent::Disconnected => self.connection.set_connected(false),
            NetworkEvent::LoginSucceeded { user_id, user_name } => {
                self.session.login(user_id, user_name);
                self.registry.sync(&self.session);
                self.error_line = None;
                if let Some(self_id) = self.session.self_id() {
                    if let Some(path) = &self.session_file {
                        let stored = StoredIdentity {
                            user_id: self_id.to_owned(),
                            user_name: self.session.user_name().to_owned(),
                        };
                        if let Err(err) = session_file::store(path, &stored) {
                            log::warn!("Failed to persist session: {err}");
                        }
                    }
                    self.loaders.fetch_user_list(self_id.to_owned());
                }
            }
            NetworkEvent::LoginFailed(message) => self.error_line = Some(message),
            NetworkEvent::UserListLoaded(users) => self.users = users,
            NetworkEvent::UserListFailed(error) => self.error_line = Some(error),
            NetworkEvent::HistoryLoaded { peer_id, messages } => {
                // phản hồi muộn cho hội thoại đã rời màn hình thì bỏ
                if self.session.peer().is_some_and(|peer| peer.id == peer_id) {
                    self.dispatcher.replace_history(messages);
                } else {
                    log::debug!("dropping stale history for {peer_id}");
                }
            }
            NetworkEvent::HistoryFailed { peer_id, error } => {
                if self.session.peer().is_some_and(|peer| peer.id == peer_id) {
                    self.dispatcher.history_failed();
                    self.error_line = Some(error);
                }
            }
            NetworkEvent::Channel(event) => match self.registry.route(&event) {
                Some(RoutedEvent::Message(message)) => self.dispatcher.apply_inbound(message),
                Some(RoutedEvent::TypingStarted) => self.typing.peer_started(now),
                Some(RoutedEvent::TypingEnded) => self.typing.peer_ended(),
                Some(RoutedEvent::RosterUpdate(names)) => {
                    self.roster.update(names, self.session.user_name());
                }
                None => {}
            },
        }
    }

    /// Tick mỗi frame: dọn hạn typing đã quá.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.typing.tick(now);
    }

    /// Teardown tiến trình: đang ở phòng thì báo rời phòng, rồi gỡ mọi binding.
    pub fn shutdown(&mut self) {
        if self.session.in_room() {
            self.connection.emit(NetworkCommand::LeaveRoom {
                user_name: self.session.user_name().to_owned(),
            });
        }
        self.registry.clear();
    }

    // --- View accessors ---

    pub fn session(&self) -> &IdentitySession {
        &self.session
    }

    pub fn users(&self) -> &[UserEntry] {
        &self.users
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        self.dispatcher.conversation()
    }

    pub fn take_new_content(&mut self) -> bool {
        self.dispatcher.take_new_content()
    }

    pub fn error_line(&self) -> Option<&str> {
        self.error_line.as_deref()
    }

    pub fn peer_is_typing(&self, now: DateTime<Utc>) -> bool {
        self.typing.peer_is_typing(now)
    }

    pub fn room_joiners(&self) -> &[String] {
        self.roster.joiners()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}
