//! Room-based WebSocket chat relay.
//!
//! Clients join a named room, exchange chat and location messages with
//! everyone in it, and receive the room's live roster.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --public-dir public
//! PORT=8080 cargo run --bin hiroba-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    domain::{MessagePusher, PresenceRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
    },
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetRoomsUseCase, JoinRoomUseCase,
        SendLocationUseCase, SendMessageUseCase,
    },
};
use hiroba_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Directory of static client files served for unmatched paths
    #[arg(long, env = "HIROBA_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory presence registry)
    let repository: Arc<dyn PresenceRepository> =
        Arc::new(InMemoryPresenceRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_location_usecase = Arc::new(SendLocationUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        join_room_usecase,
        send_message_usecase,
        send_location_usecase,
        disconnect_client_usecase,
        get_rooms_usecase,
    )
    .with_public_dir(args.public_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
