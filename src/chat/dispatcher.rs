use crate::common::{ChatError, ChatMessage, NetworkCommand};
use crate::network::ConnectionManager;
use crate::session::IdentitySession;

/// Gửi tin nhắn đi (kèm local echo) và áp dụng tin nhắn inbound vào hội thoại.
///
/// Hội thoại là chuỗi append-only theo thứ tự tới; đổi bối cảnh peer/phòng thì
/// thay thế nguyên khối, không merge.
pub struct MessageDispatcher {
    conversation: Vec<ChatMessage>,
    awaiting_history: bool,
    new_content: bool,
}

impl MessageDispatcher {
    pub fn new() -> Self {
        Self {
            conversation: Vec::new(),
            awaiting_history: false,
            new_content: false,
        }
    }

    /// Validate rồi gửi: echo cục bộ được nối vào hội thoại TRƯỚC khi frame
    /// rời máy. Backend không bao giờ vọng lại tin cho chính người gửi nên
    /// không cần khử trùng lặp — mỗi lần gửi đúng một bản sao.
    pub fn send(
        &mut self,
        session: &IdentitySession,
        connection: &ConnectionManager,
        body: &str,
    ) -> Result<(), ChatError> {
        let Some(self_id) = session.self_id() else {
            return Err(ChatError::Validation("Message is missing".to_owned()));
        };
        if body.is_empty() {
            return Err(ChatError::Validation("Message is missing".to_owned()));
        }
        if self.awaiting_history {
            return Err(ChatError::Validation(
                "Conversation is still loading".to_owned(),
            ));
        }

        let message = ChatMessage {
            from: self_id.to_owned(),
            to: session.peer().map(|peer| peer.id.clone()),
            message: body.to_owned(),
            send_all: session.in_room(),
            bg_color: session.room_color().map(str::to_owned),
            send_by_you: false,
        };

        let mut echoed = message.clone();
        echoed.send_by_you = true;
        self.conversation.push(echoed);
        self.new_content = true;

        connection.emit(NetworkCommand::SendMessage(message));
        Ok(())
    }

    /// Tin inbound cho khóa đang bind: nối theo thứ tự tới.
    pub fn apply_inbound(&mut self, message: ChatMessage) {
        self.conversation.push(message);
        self.new_content = true;
    }

    /// Bắt đầu nạp lịch sử cho peer mới: hội thoại cũ bị loại bỏ toàn bộ,
    /// chặn gửi tới khi lịch sử về (hoặc lỗi).
    pub fn begin_history_load(&mut self) {
        self.conversation.clear();
        self.awaiting_history = true;
    }

    /// Thay thế nguyên khối bằng lịch sử vừa nạp.
    pub fn replace_history(&mut self, messages: Vec<ChatMessage>) {
        self.conversation = messages;
        self.awaiting_history = false;
        self.new_content = true;
    }

    /// Nạp lịch sử thất bại: mở khóa gửi với hội thoại rỗng.
    pub fn history_failed(&mut self) {
        self.awaiting_history = false;
    }

    /// Vào phòng: hội thoại mới tinh, không có lịch sử để nạp.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.awaiting_history = false;
        self.new_content = false;
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    /// Tín hiệu "có nội dung mới" cho view cuộn xuống đáy; đọc là reset.
    pub fn take_new_content(&mut self) -> bool {
        std::mem::take(&mut self.new_content)
    }
}

impl Default for MessageDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserEntry;
    use tokio::sync::mpsc;

    fn direct_session() -> IdentitySession {
        let mut session = IdentitySession::new();
        session.login("u1".to_owned(), "alice".to_owned());
        session.select_peer(UserEntry {
            id: "u2".to_owned(),
            user_name: "bob".to_owned(),
        });
        session
    }

    fn connection() -> (ConnectionManager, mpsc::Receiver<NetworkCommand>) {
        let (tx, rx) = mpsc::channel(8);
        (ConnectionManager::new(tx), rx)
    }

    #[test]
    fn empty_body_is_rejected_without_side_effects() {
        let (conn, mut rx) = connection();
        let mut dispatcher = MessageDispatcher::new();

        let err = dispatcher.send(&direct_session(), &conn, "").unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert!(dispatcher.conversation().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn anonymous_send_is_rejected() {
        let (conn, mut rx) = connection();
        let mut dispatcher = MessageDispatcher::new();

        let err = dispatcher
            .send(&IdentitySession::new(), &conn, "hi")
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn send_appends_exactly_one_local_echo() {
        let (conn, mut rx) = connection();
        let mut dispatcher = MessageDispatcher::new();
        let session = direct_session();

        dispatcher.send(&session, &conn, "hi").expect("send");
        assert_eq!(dispatcher.conversation().len(), 1);

        let echoed = &dispatcher.conversation()[0];
        assert!(echoed.send_by_you);
        assert_eq!(echoed.from, "u1");
        assert_eq!(echoed.to.as_deref(), Some("u2"));
        assert!(!echoed.send_all);

        let command = rx.try_recv().expect("one outbound frame");
        assert_eq!(command.event_name(), "send_message");
        assert!(rx.try_recv().is_err());

        // an inbound copy with identical content is still appended — the
        // no-self-echo contract means it must be from the peer
        dispatcher.apply_inbound(ChatMessage {
            from: "u2".to_owned(),
            to: Some("u1".to_owned()),
            message: "hi".to_owned(),
            send_all: false,
            bg_color: None,
            send_by_you: false,
        });
        assert_eq!(dispatcher.conversation().len(), 2);
        assert!(!dispatcher.conversation()[1].send_by_you);
    }

    #[test]
    fn sends_are_gated_while_history_loads() {
        let (conn, mut rx) = connection();
        let mut dispatcher = MessageDispatcher::new();
        let session = direct_session();

        dispatcher.apply_inbound(ChatMessage {
            from: "u3".to_owned(),
            to: Some("u1".to_owned()),
            message: "old".to_owned(),
            send_all: false,
            bg_color: None,
            send_by_you: false,
        });

        dispatcher.begin_history_load();
        assert!(dispatcher.conversation().is_empty());
        assert!(dispatcher.send(&session, &conn, "hi").is_err());
        assert!(rx.try_recv().is_err());

        dispatcher.replace_history(vec![]);
        assert!(dispatcher.send(&session, &conn, "hi").is_ok());
        assert_eq!(dispatcher.conversation().len(), 1);
    }

    #[test]
    fn history_replaces_wholesale_never_merges() {
        let (conn, _rx) = connection();
        let mut dispatcher = MessageDispatcher::new();
        let session = direct_session();

        dispatcher.send(&session, &conn, "to A").expect("send");
        dispatcher.begin_history_load();
        dispatcher.replace_history(vec![ChatMessage {
            from: "u3".to_owned(),
            to: Some("u1".to_owned()),
            message: "from B".to_owned(),
            send_all: false,
            bg_color: None,
            send_by_you: false,
        }]);

        assert_eq!(dispatcher.conversation().len(), 1);
        assert_eq!(dispatcher.conversation()[0].message, "from B");
    }

    #[test]
    fn new_content_signal_is_read_once() {
        let mut dispatcher = MessageDispatcher::new();
        assert!(!dispatcher.take_new_content());

        dispatcher.apply_inbound(ChatMessage {
            from: "u2".to_owned(),
            to: Some("u1".to_owned()),
            message: "hi".to_owned(),
            send_all: false,
            bg_color: None,
            send_by_you: false,
        });
        assert!(dispatcher.take_new_content());
        assert!(!dispatcher.take_new_content());
    }
}
