mod common;
mod config;
mod network;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use network::SocketClient;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "chatbot_client",
    version,
    about = "Desktop client for the chatbot assistant"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let socket_url = app_config.socket_url();
    log::info!("Using chat endpoint {socket_url}");

    // 1. Tạo kênh giao tiếp UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);

    // 2. Khởi chạy Network Thread (Chạy ngầm)
    tokio::spawn(async move {
        let client = SocketClient::new(cmd_rx, socket_url);
        if let Err(err) = client.run().await {
            log::error!("Socket client terminated: {err}");
        }
    });

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Chatbot Assistant",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, cmd_tx.clone())))),
    )
}
