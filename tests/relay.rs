use futures::{SinkExt, StreamExt};
use std::net::{SocketAddr, TcpListener};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use netwatch::relay;

async fn start_relay() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        relay::serve(listener).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn echoes_text_message() {
    let addr = start_relay().await;
    let (mut ws, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();

    ws.send(Message::Text("ping".to_string())).await.unwrap();
    let reply = ws.next().await.unwrap().unwrap();
    assert_eq!(reply, Message::Text("ping".to_string()));
}

#[tokio::test]
async fn echoes_in_order_and_binary_unchanged() {
    let addr = start_relay().await;
    let (mut ws, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();

    ws.send(Message::Text("first".to_string())).await.unwrap();
    ws.send(Message::Binary(vec![0xff, 0x00, 0x7f])).await.unwrap();

    assert_eq!(ws.next().await.unwrap().unwrap(), Message::Text("first".to_string()));
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::Binary(vec![0xff, 0x00, 0x7f]));
}

#[tokio::test]
async fn connections_are_independent() {
    let addr = start_relay().await;
    let (mut a, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();
    let (mut b, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();

    b.send(Message::Text("from b".to_string())).await.unwrap();
    a.send(Message::Text("from a".to_string())).await.unwrap();

    assert_eq!(a.next().await.unwrap().unwrap(), Message::Text("from a".to_string()));
    assert_eq!(b.next().await.unwrap().unwrap(), Message::Text("from b".to_string()));

    a.close(None).await.unwrap();
    b.send(Message::Text("still here".to_string())).await.unwrap();
    assert_eq!(b.next().await.unwrap().unwrap(), Message::Text("still here".to_string()));
}

#[tokio::test]
async fn plain_http_request_does_not_stop_server() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let addr = start_relay().await;
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response);
    assert!(!response.starts_with("HTTP/1.1 101"));
    assert!(response.starts_with("HTTP/1.1 4"));

    let (mut ws, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();
    ws.send(Message::Text("ping".to_string())).await.unwrap();
    assert_eq!(ws.next().await.unwrap().unwrap(), Message::Text("ping".to_string()));
}
