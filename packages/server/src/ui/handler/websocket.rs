//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::{mpsc, watch};

use crate::ui::{session::RoomSession, state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This is the outbound half of a connection: everything the relay sends to this client
/// (room broadcasts, private messages, acknowledgements) goes through `rx`.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Feeds inbound frames to the session until the peer goes away or `stop` fires.
///
/// `stop` is only observed between frames: a frame taken off the socket is
/// always handled to the end.
async fn receive_loop<S>(
    mut receiver: S,
    session: Arc<RoomSession>,
    mut stop: watch::Receiver<bool>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            _ = stop.changed() => {
                tracing::debug!("Stopped reading from '{}'", session.connection_id());
                break;
            }
            msg = receiver.next() => msg,
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!(
                    "Received text from '{}': {}",
                    session.connection_id(),
                    text.as_str()
                );
                session.handle_text(text.as_str()).await;
            }
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                tracing::debug!("Received ping");
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", session.connection_id());
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let session = Arc::new(RoomSession::open(state, tx).await);

    let (stop_tx, stop_rx) = watch::channel(false);
    let mut recv_task = tokio::spawn(receive_loop(receiver, session.clone(), stop_rx));
    let mut send_task = pusher_loop(rx, sender);

    let reader_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };

    if reader_finished {
        send_task.abort();
    } else {
        // The writer is gone; let the reader finish its current frame first
        let _ = stop_tx.send(true);
        if let Err(e) = recv_task.await {
            tracing::error!("Receive task of '{}' failed: {}", session.connection_id(), e);
        }
    }

    session.close().await;
}

#[cfg(test)]
mod tests {
    use futures_util::stream;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        infrastructure::dto::websocket::ServerMessage,
        ui::test_support::{ack, admin, create_test_state, drain, open},
    };

    #[tokio::test]
    async fn test_stop_waits_for_frame_in_progress() {
        // テスト項目: 停止要求が来ても、受信済みのフレームの処理は最後まで行われる
        // given (前提条件):
        let state = create_test_state();
        let (session, mut rx) = open(&state).await;
        let session = Arc::new(session);
        let taken = Arc::new(Notify::new());
        let frames = Box::pin(
            stream::once({
                let taken = taken.clone();
                async move {
                    taken.notify_one();
                    Ok::<_, axum::Error>(Message::Text(
                        r#"{"event":"join","data":{"name":"Alice","room":"r1"},"ack":1}"#.into(),
                    ))
                }
            })
            .chain(stream::pending()),
        );
        let (stop_tx, stop_rx) = watch::channel(false);

        // 他のイベントの処理中で、受信したフレームはロック待ちになる
        let guard = state.event_lock.lock().await;
        let task = tokio::spawn(receive_loop(frames, session, stop_rx));
        taken.notified().await;

        // when (操作):
        stop_tx.send(true).unwrap();
        drop(guard);
        task.await.unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx),
            vec![
                ServerMessage::UpdateUserList(vec!["Alice".to_string()]),
                admin("Welcome to web chat"),
                ack(1, None),
            ]
        );
        assert_eq!(state.get_rooms_usecase.execute().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_ends_idle_loop() {
        // テスト項目: フレームを待っている間に停止要求が来るとループが終了する
        // given (前提条件):
        let state = create_test_state();
        let (session, _rx) = open(&state).await;
        let frames = Box::pin(stream::pending::<Result<Message, axum::Error>>());
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(receive_loop(frames, Arc::new(session), stop_rx));

        // when (操作):
        stop_tx.send(true).unwrap();

        // then (期待する結果):
        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
