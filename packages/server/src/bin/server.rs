//! Real-time WebSocket chat relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server
//! cargo run --bin hearth-server -- --host 127.0.0.1 --port 8080
//! ```

use std::sync::Arc;

use clap::Parser;
use hearth_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository},
    ui::Server,
    usecase::ChatCoordinator,
};
use hearth_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hearth-server")]
#[command(about = "Real-time WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Coordinator
    // 4. Server
    let repository = Arc::new(InMemoryRosterRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let coordinator = ChatCoordinator::spawn(repository, message_pusher, Arc::new(SystemClock));

    let server = Server::new(coordinator);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
