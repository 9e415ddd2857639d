/// Danh sách thành viên phòng chung, thay thế nguyên khối mỗi lần cập nhật.
///
/// Không có add/remove từng phần: payload `update_join_array` luôn là toàn bộ
/// roster hiện tại của phòng.
#[derive(Debug, Default)]
pub struct RoomMembershipTracker {
    joiners: Vec<String>,
}

impl RoomMembershipTracker {
    pub fn new() -> Self {
        Self {
            joiners: Vec::new(),
        }
    }

    /// Thay toàn bộ roster bằng payload, bỏ tên của chính mình; thứ tự payload
    /// được giữ nguyên để hiển thị.
    pub fn update(&mut self, names: Vec<String>, own_name: &str) {
        self.joiners = names.into_iter().filter(|name| name != own_name).collect();
    }

    pub fn joiners(&self) -> &[String] {
        &self.joiners
    }
}
