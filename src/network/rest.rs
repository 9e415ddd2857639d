use serde::Deserialize;
use serde_json::json;

use crate::common::{ChatError, ChatMessage, UserEntry};

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    message: Option<String>,
}

/// Các endpoint danh sách bọc payload trong `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ListResponse<T> {
    #[serde(default)]
    data: Option<Vec<T>>,
}

/// REST client cho đăng nhập, danh sách user và lịch sử tin nhắn.
///
/// Truy vấn một lần, không retry; kết quả thay thế trạng thái cũ chứ không merge.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST /sign — trả về userId, hoặc Auth khi backend từ chối.
    pub async fn sign(&self, user_name: &str, password: &str) -> Result<String, ChatError> {
        let response = self
            .http
            .post(format!("{}/sign", self.base_url))
            .json(&json!({ "userName": user_name, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let body: SignResponse = response.json().await.map_err(transport)?;
        match body.user_id {
            Some(user_id) => Ok(user_id),
            None => Err(ChatError::Auth(
                body.message
                    .unwrap_or_else(|| "Something went wrong".to_owned()),
            )),
        }
    }

    /// GET /user-list/{selfId}
    pub async fn user_list(&self, self_id: &str) -> Result<Vec<UserEntry>, ChatError> {
        let response = self
            .http
            .get(format!("{}/user-list/{self_id}", self.base_url))
            .send()
            .await
            .map_err(transport)?;

        let body: ListResponse<UserEntry> = response.json().await.map_err(transport)?;
        Ok(body.data.unwrap_or_default())
    }

    /// GET /message-list/{selfId}/{peerId} — lịch sử theo thứ tự của backend.
    pub async fn message_list(
        &self,
        self_id: &str,
        peer_id: &str,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let response = self
            .http
            .get(format!("{}/message-list/{self_id}/{peer_id}", self.base_url))
            .send()
            .await
            .map_err(transport)?;

        let body: ListResponse<ChatMessage> = response.json().await.map_err(transport)?;
        Ok(body.data.unwrap_or_default())
    }
}

fn transport(err: reqwest::Error) -> ChatError {
    ChatError::Transport(err.to_string())
}
