//! WebSocket echo relay.
//!
//! Every connection upgraded on `/` is handled independently: each message read is
//! passed through [`process_message`] and written back. A read error or a close
//! frame ends the connection; a failed write is logged and reading continues.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::{Router, Server};
use std::error::Error;
use std::net::TcpListener;
use tracing::{debug, info, warn};

pub fn router() -> Router {
    Router::new().route("/", get(upgrade))
}

/// Runs the relay on an already bound listener until the server fails.
pub async fn serve(listener: TcpListener) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Starting relay on {}", listener.local_addr()?);
    Server::from_tcp(listener)?
        .serve(router().into_make_service())
        .await?;
    Ok(())
}

// Origins are not checked; every upgrade request is accepted.
async fn upgrade(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_socket)
}

pub async fn handle_socket(mut socket: WebSocket) {
    debug!("Connection opened");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!("error: {}", e);
                break;
            }
        };

        let reply = match msg {
            Message::Close(_) => break,
            // answered by the protocol layer
            Message::Ping(_) | Message::Pong(_) => continue,
            msg => process_message(msg),
        };

        if let Err(e) = socket.send(reply).await {
            warn!("error sending message: {}", e);
        }
    }

    debug!("Connection closed");
}

/// Identity transform applied to every relayed message.
pub fn process_message(message: Message) -> Message {
    message
}
