use std::error::Error;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::common::{NetworkCommand, NetworkEvent};

use super::protocol;

const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Task sở hữu kết nối WebSocket duy nhất tới backend.
///
/// Mỗi chiều một kênh: lệnh từ UI đi xuống, frame đã giải mã đi lên. Mất kết
/// nối chỉ phát `Disconnected` rồi tự nối lại — phiên và hội thoại phía UI
/// giữ nguyên.
pub struct SocketClient {
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
    socket_url: String,
}

impl SocketClient {
    pub fn new(
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
        socket_url: String,
    ) -> Self {
        Self {
            event_sender,
            command_receiver,
            socket_url,
        }
    }

    pub async fn run(mut self) -> Result<(), Box<dyn Error>> {
        log::info!("Socket event loop started");

        loop {
            let stream = match connect_async(self.socket_url.as_str()).await {
                Ok((stream, _)) => stream,
                Err(err) => {
                    log::warn!("Socket connect to {} failed: {err}", self.socket_url);
                    let _ = self.event_sender.send(NetworkEvent::Disconnected).await;
                    tokio::time::sleep(RECONNECT_DELAY).await;
                    continue;
                }
            };

            log::info!("Socket connected to {}", self.socket_url);
            let _ = self.event_sender.send(NetworkEvent::Connected).await;

            let (mut sink, mut source) = stream.split();
            let shutting_down = loop {
                tokio::select! {
                    command = self.command_receiver.recv() => {
                        match command {
                            Some(command) => {
                                match protocol::encode(&command) {
                                    Ok(frame) => {
                                        if let Err(err) = sink.send(Message::Text(frame.into())).await {
                                            log::warn!("Socket send error: {err}");
                                            break false;
                                        }
                                    }
                                    Err(err) => {
                                        log::warn!("Failed to serialize outbound frame: {err}");
                                    }
                                }
                            }
                            // UI side dropped the channel; tear the task down
                            None => break true,
                        }
                    }
                    frame = source.next() => {
                        match frame {
                            Some(Ok(Message::Text(text))) => {
                                match protocol::decode(text.as_str()) {
                                    Ok(event) => {
                                        let _ = self
                                            .event_sender
                                            .send(NetworkEvent::Channel(event))
                                            .await;
                                    }
                                    Err(err) => log::warn!("Undecodable frame: {err}"),
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => break false,
                            Some(Ok(_)) => {} // ping/pong/binary: bỏ qua
                            Some(Err(err)) => {
                                log::warn!("Socket stream error: {err}");
                                break false;
                            }
                        }
                    }
                }
            };

            let _ = self.event_sender.send(NetworkEvent::Disconnected).await;
            if shutting_down {
                break;
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }

        Ok(())
    }
}
