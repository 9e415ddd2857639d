use thiserror::Error;

/// Phân loại lỗi của client.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Lỗi nhập liệu cục bộ (tin nhắn rỗng, hội thoại đang nạp).
    #[error("{0}")]
    Validation(String),
    /// Đăng nhập bị backend từ chối.
    #[error("{0}")]
    Auth(String),
    /// Lỗi mạng khi gọi REST.
    #[error("{0}")]
    Transport(String),
}
