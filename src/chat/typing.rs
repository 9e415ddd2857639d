use chrono::{DateTime, Duration, Utc};

/// Hạn tự tắt cờ "đang gõ" nếu không có event kết thúc.
const EXPIRY_MS: i64 = 5000;

/// Chuyển tiếp biên của ô nhập: rỗng <-> không rỗng.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingSignal {
    Started,
    Stopped,
}

/// Cờ "peer đang gõ" với hạn tự hết, cộng phát hiện biên gõ phím cục bộ.
///
/// Thời gian được tiêm qua tham số `now` nên test tự điều khiển đồng hồ ảo
/// thay vì chờ timer thật.
pub struct TypingIndicatorTimer {
    deadline: Option<DateTime<Utc>>,
    draft_active: bool,
}

impl TypingIndicatorTimer {
    pub fn new() -> Self {
        Self {
            deadline: None,
            draft_active: false,
        }
    }

    /// `start_typing` từ peer: đặt lại hạn 5000ms; hạn cũ (nếu có) bị hủy
    /// trước khi hạn mới được đặt.
    pub fn peer_started(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + Duration::milliseconds(EXPIRY_MS));
    }

    /// `end_typing` từ peer: tắt cờ và hủy hạn.
    pub fn peer_ended(&mut self) {
        self.deadline = None;
    }

    /// Cờ đúng trong [start, start + 5000ms), sai từ mốc hết hạn trở đi.
    pub fn peer_is_typing(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Gọi mỗi frame: dọn hạn đã quá để trạng thái không giữ mốc cũ.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.deadline = None;
            }
        }
    }

    /// Theo dõi ô nhập; chỉ phát tín hiệu tại biên chuyển, không theo từng
    /// phím — sửa tiếp khi ô đã không rỗng thì không phát lại Started.
    pub fn observe_draft(&mut self, draft: &str) -> Option<TypingSignal> {
        let active = !draft.is_empty();
        if active == self.draft_active {
            return None;
        }
        self.draft_active = active;
        Some(if active {
            TypingSignal::Started
        } else {
            TypingSignal::Stopped
        })
    }
}

impl Default for TypingIndicatorTimer {
    fn default() -> Self {
        Self::new()
    }
}
