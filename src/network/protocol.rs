use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{ChannelEvent, NetworkCommand};

/// Frame trên wire: `{"event": <tên>, "data": <payload>}` (text frame).
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

pub fn encode(command: &NetworkCommand) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope {
        event: command.event_name().to_owned(),
        data: command.payload(),
    })
}

pub fn decode(raw: &str) -> serde_json::Result<ChannelEvent> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    Ok(ChannelEvent {
        name: envelope.event,
        data: envelope.data,
    })
}

/// Các event inbound có khóa theo id nằm ngay trong tên event.
pub fn message_received(self_id: &str) -> String {
    format!("message_received_{self_id}")
}

pub fn started_typing(peer_id: &str, self_id: &str) -> String {
    format!("started_typing_{peer_id}_{self_id}")
}

pub fn ended_typing(peer_id: &str, self_id: &str) -> String {
    format!("ended_typing_{peer_id}_{self_id}")
}

/// Roster phòng chung không có khóa: thành viên là toàn cục cho phòng ephemeral.
pub const UPDATE_JOIN_ARRAY: &str = "update_join_array";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ChatMessage;

    #[test]
    fn send_message_frame_shape() {
        let command = NetworkCommand::SendMessage(ChatMessage {
            from: "u1".to_owned(),
            to: Some("u2".to_owned()),
            message: "hi".to_owned(),
            send_all: false,
            bg_color: None,
            send_by_you: true,
        });

        let frame = encode(&command).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(value["event"], "send_message");
        assert_eq!(value["data"]["message"], "hi");
        assert_eq!(value["data"]["from"], "u1");
        assert_eq!(value["data"]["to"], "u2");
        assert_eq!(value["data"]["sendAll"], false);
        // local-echo flag and absent color never reach the wire
        assert!(value["data"].get("sendByYou").is_none());
        assert!(value["data"].get("bgColor").is_none());
    }

    #[test]
    fn join_room_frame_carries_bare_name() {
        let command = NetworkCommand::JoinRoom {
            user_name: "alice".to_owned(),
        };
        let frame = encode(&command).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(value["event"], "on_join_room");
        assert_eq!(value["data"], "alice");
    }

    #[test]
    fn decode_named_frame() {
        let event = decode(r#"{"event":"update_join_array","data":["alice","bob"]}"#)
            .expect("decode");
        assert_eq!(event.name, UPDATE_JOIN_ARRAY);
        assert_eq!(event.data[1], "bob");
    }

    #[test]
    fn keyed_event_names() {
        assert_eq!(message_received("u1"), "message_received_u1");
        assert_eq!(started_typing("u2", "u1"), "started_typing_u2_u1");
        assert_eq!(ended_typing("u2", "u1"), "ended_typing_u2_u1");
    }
}
