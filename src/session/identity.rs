use rand::Rng;

use crate::common::UserEntry;

/// Bảng màu bong bóng phòng chat (giữ nguyên từ giao diện web cũ).
const ROOM_COLORS: [&str; 9] = [
    "#4caf50", "#ffeb3b", "#00bcd4", "#ff9800", "#e91e63", "#009688", "#64dd17", "#ffca28",
    "#ff4081",
];

/// Bối cảnh hội thoại đang mở. Direct và Room loại trừ lẫn nhau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationContext {
    None,
    Direct { peer: UserEntry },
    Room { color: String },
}

/// Máy trạng thái danh tính: Anonymous -> Authenticated -> {Direct | Room}.
///
/// Nguồn sự thật duy nhất cho "mình đang nói chuyện với ai"; các thành phần
/// khác chỉ đọc và phản ứng theo thay đổi. Không có transition quay về
/// Authenticated hay Anonymous — lối ra duy nhất là teardown của tiến trình.
#[derive(Debug, Clone)]
pub struct IdentitySession {
    self_id: Option<String>,
    user_name: String,
    context: ConversationContext,
}

impl IdentitySession {
    pub fn new() -> Self {
        Self {
            self_id: None,
            user_name: String::new(),
            context: ConversationContext::None,
        }
    }

    /// Anonymous -> Authenticated. Cũng dùng khi khôi phục phiên đã lưu.
    pub fn login(&mut self, user_id: String, user_name: String) {
        if self.self_id.is_some() {
            log::warn!("login called twice; keeping the first identity");
            return;
        }
        self.self_id = Some(user_id);
        self.user_name = user_name;
    }

    /// Vào hội thoại 1-1. Trả về true nếu bối cảnh thực sự thay đổi;
    /// chọn lại đúng peer đang mở là no-op không side effect.
    pub fn select_peer(&mut self, peer: UserEntry) -> bool {
        if self.self_id.is_none() {
            log::warn!("select_peer before login; ignored");
            return false;
        }
        match &self.context {
            ConversationContext::Room { .. } => {
                log::warn!("select_peer while in room; ignored");
                false
            }
            ConversationContext::Direct { peer: current } if current.id == peer.id => false,
            _ => {
                self.context = ConversationContext::Direct { peer };
                true
            }
        }
    }

    /// Vào phòng chung; màu phòng được chọn đúng một lần tại đây và giữ
    /// nguyên cho mọi tin gửi trong phiên phòng.
    pub fn join_room<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.self_id.is_none() {
            log::warn!("join_room before login; ignored");
            return false;
        }
        if self.context != ConversationContext::None {
            log::warn!("join_room from an active conversation; ignored");
            return false;
        }
        let color = ROOM_COLORS[rng.gen_range(0..ROOM_COLORS.len())];
        self.context = ConversationContext::Room {
            color: color.to_owned(),
        };
        true
    }

    pub fn self_id(&self) -> Option<&str> {
        self.self_id.as_deref()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn peer(&self) -> Option<&UserEntry> {
        match &self.context {
            ConversationContext::Direct { peer } => Some(peer),
            _ => None,
        }
    }

    pub fn room_color(&self) -> Option<&str> {
        match &self.context {
            ConversationContext::Room { color } => Some(color),
            _ => None,
        }
    }

    pub fn in_room(&self) -> bool {
        matches!(self.context, ConversationContext::Room { .. })
    }
}

impl Default for IdentitySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn user(id: &str, name: &str) -> UserEntry {
        UserEntry {
            id: id.to_owned(),
            user_name: name.to_owned(),
        }
    }

    #[test]
    fn login_moves_to_authenticated_once() {
        let mut session = IdentitySession::new();
        assert!(session.self_id().is_none());

        session.login("u1".to_owned(), "alice".to_owned());
        assert_eq!(session.self_id(), Some("u1"));
        assert_eq!(session.user_name(), "alice");

        session.login("u9".to_owned(), "mallory".to_owned());
        assert_eq!(session.self_id(), Some("u1"));
    }

    #[test]
    fn select_peer_is_idempotent_for_same_id() {
        let mut session = IdentitySession::new();
        session.login("u1".to_owned(), "alice".to_owned());

        assert!(session.select_peer(user("u2", "bob")));
        assert!(!session.select_peer(user("u2", "bob")));
        assert_eq!(session.peer().map(|p| p.id.as_str()), Some("u2"));
    }

    #[test]
    fn switching_peers_changes_context() {
        let mut session = IdentitySession::new();
        session.login("u1".to_owned(), "alice".to_owned());
        session.select_peer(user("u2", "bob"));

        assert!(session.select_peer(user("u3", "carol")));
        assert_eq!(session.peer().map(|p| p.id.as_str()), Some("u3"));
    }

    #[test]
    fn peer_and_room_are_mutually_exclusive() {
        let mut session = IdentitySession::new();
        session.login("u1".to_owned(), "alice".to_owned());
        let mut rng = StdRng::seed_from_u64(7);

        assert!(session.join_room(&mut rng));
        assert!(session.in_room());
        assert!(session.peer().is_none());

        // no transition out of the room short of teardown
        assert!(!session.select_peer(user("u2", "bob")));
        assert!(session.in_room());
    }

    #[test]
    fn join_room_requires_authentication() {
        let mut session = IdentitySession::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(!session.join_room(&mut rng));
    }

    #[test]
    fn room_color_is_fixed_and_seed_deterministic() {
        let color_for = |seed| {
            let mut session = IdentitySession::new();
            session.login("u1".to_owned(), "alice".to_owned());
            let mut rng = StdRng::seed_from_u64(seed);
            session.join_room(&mut rng);
            session.room_color().expect("room color").to_owned()
        };

        assert_eq!(color_for(7), color_for(7));
        assert!(ROOM_COLORS.contains(&color_for(42).as_str()));
    }
}
