//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRoomsUseCase, JoinRoomUseCase,
    SendLocationUseCase, SendMessageUseCase,
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     send_location_usecase,
///     disconnect_client_usecase,
///     get_rooms_usecase,
/// )
/// .with_public_dir("public");
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    send_location_usecase: Arc<SendLocationUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// Directory of the browser client bundle, served for any unmatched path
    public_dir: Option<PathBuf>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for accepting a connection
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `send_message_usecase` - UseCase for relaying chat messages
    /// * `send_location_usecase` - UseCase for relaying locations
    /// * `disconnect_client_usecase` - UseCase for connection teardown
    /// * `get_rooms_usecase` - UseCase for listing rooms
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        send_location_usecase: Arc<SendLocationUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            join_room_usecase,
            send_message_usecase,
            send_location_usecase,
            disconnect_client_usecase,
            get_rooms_usecase,
            public_dir: None,
        }
    }

    /// Serve static files from `dir` for paths not handled by the API.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Build the router without binding a listener.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            send_location_usecase: self.send_location_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            event_lock: Mutex::new(()),
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms));

        let app = match self.public_dir {
            Some(dir) => {
                tracing::info!("Serving static files from {}", dir.display());
                app.fallback_service(ServeDir::new(dir))
            }
            None => app,
        };

        app.layer(TraceLayer::new_for_http()).with_state(app_state)
    }

    /// Run the WebSocket chat relay
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
