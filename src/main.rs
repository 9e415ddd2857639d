mod chat;
mod common;
mod config;
mod network;
mod session;
mod storage;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use chat::{ChatController, Loaders};
use network::{ConnectionManager, RestClient, SocketClient};
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_socket_chat",
    version,
    about = "Realtime chat client (WebSocket + REST)"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Path to the persisted session file
    #[arg(long, default_value = storage::session_file::DEFAULT_SESSION_PATH, value_name = "FILE")]
    session: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Socket Task (Chạy ngầm)
    let socket_url = app_config.socket_url.clone();
    let socket_event_tx = event_tx.clone();
    tokio::spawn(async move {
        let client = SocketClient::new(socket_event_tx, cmd_rx, socket_url);
        if let Err(err) = client.run().await {
            log::error!("Socket client terminated: {err}");
        }
    });

    let rest = RestClient::new(app_config.server_url.clone());
    let loaders = Loaders::new(Handle::current(), rest, event_tx);
    let connection = ConnectionManager::new(cmd_tx);

    let stored = storage::session_file::load(&cli.session);
    let stored_user_name = stored
        .as_ref()
        .map(|identity| identity.user_name.clone())
        .unwrap_or_default();

    let mut controller = ChatController::new(connection, loaders, Some(cli.session.clone()));
    controller.restore_identity(stored);

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let mut controller = Some(controller);

    eframe::run_native(
        "Rust Socket Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");
            let controller = controller
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started against {}", app_config.server_url);

            Ok(Box::new(ChatApp::new(
                cc,
                controller,
                event_receiver,
                stored_user_name.clone(),
            )))
        }),
    )
}
