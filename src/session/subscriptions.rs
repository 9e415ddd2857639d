use crate::common::{ChannelEvent, ChatMessage};
use crate::network::protocol;

use super::identity::IdentitySession;

/// Khóa đăng ký cho sự kiện inbound, suy ra từ trạng thái phiên.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKey {
    Messages { self_id: String },
    Typing { peer_id: String, self_id: String },
    Roster,
}

/// Sự kiện inbound đã định tuyến tới đúng thành phần.
#[derive(Debug)]
pub enum RoutedEvent {
    Message(ChatMessage),
    TypingStarted,
    TypingEnded,
    RosterUpdate(Vec<String>),
}

/// Giữ đúng tập handler inbound cho phiên hiện tại.
///
/// Mỗi lần phiên đổi (login, đổi peer, vào phòng) gọi `sync`: khóa cũ được gỡ
/// trước khi khóa mới có hiệu lực, nên không bao giờ có hai binding chồng
/// nhau cho cùng một event — mỗi frame inbound được giao đúng một lần.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    bindings: Vec<BindingKey>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Đồng bộ tập binding với trạng thái phiên.
    pub fn sync(&mut self, session: &IdentitySession) {
        let desired = Self::desired_bindings(session);

        // gỡ khóa cũ trước khi gắn khóa mới
        self.bindings.retain(|key| {
            let keep = desired.contains(key);
            if !keep {
                log::debug!("unbind {key:?}");
            }
            keep
        });

        for key in desired {
            if !self.bindings.contains(&key) {
                log::debug!("bind {key:?}");
                self.bindings.push(key);
            }
        }
    }

    /// Gỡ toàn bộ binding (teardown).
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    fn desired_bindings(session: &IdentitySession) -> Vec<BindingKey> {
        let mut desired = Vec::new();
        let Some(self_id) = session.self_id() else {
            return desired;
        };

        desired.push(BindingKey::Messages {
            self_id: self_id.to_owned(),
        });
        if let Some(peer) = session.peer() {
            desired.push(BindingKey::Typing {
                peer_id: peer.id.clone(),
                self_id: self_id.to_owned(),
            });
        }
        if session.in_room() {
            desired.push(BindingKey::Roster);
        }
        desired
    }

    /// Định tuyến một frame inbound; None khi không khóa nào khớp (frame bị bỏ).
    pub fn route(&self, event: &ChannelEvent) -> Option<RoutedEvent> {
        for key in &self.bindings {
            if let Some(routed) = Self::match_key(key, event) {
                return Some(routed);
            }
        }
        log::debug!("dropping unrouted event {}", event.name);
        None
    }

    fn match_key(key: &BindingKey, event: &ChannelEvent) -> Option<RoutedEvent> {
        match key {
            BindingKey::Messages { self_id } if event.name == protocol::message_received(self_id) => {
                match serde_json::from_value::<ChatMessage>(event.data.clone()) {
                    Ok(message) => Some(RoutedEvent::Message(message)),
                    Err(err) => {
                        log::warn!("Malformed message payload: {err}");
                        None
                    }
                }
            }
            BindingKey::Typing { peer_id, self_id }
                if event.name == protocol::started_typing(peer_id, self_id) =>
            {
                Some(RoutedEvent::TypingStarted)
            }
            BindingKey::Typing { peer_id, self_id }
                if event.name == protocol::ended_typing(peer_id, self_id) =>
            {
                Some(RoutedEvent::TypingEnded)
            }
            BindingKey::Roster if event.name == protocol::UPDATE_JOIN_ARRAY => {
                match serde_json::from_value::<Vec<String>>(event.data.clone()) {
                    Ok(names) => Some(RoutedEvent::RosterUpdate(names)),
                    Err(err) => {
                        log::warn!("Malformed roster payload: {err}");
                        None
                    }
                }
            }
            _ => None,
        }
    }

    #[cfg(test)]
    fn bindings(&self) -> &[BindingKey] {
        &self.bindings
    }
}
