use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;

use super::*;

const WAIT: Duration = Duration::from_secs(5);

type ServerSocket = WebSocketStream<TcpStream>;

/// Spawn a client against an in-process WebSocket server and hand back the
/// command sender plus the accepted server side of the connection.
async fn connect_pair() -> (mpsc::Sender<NetworkCommand>, ServerSocket) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("ws://{addr}/socket.io/");

    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    let client = SocketClient::new(cmd_rx, url);
    tokio::spawn(async move {
        let _ = client.run().await;
    });

    let (stream, _) = listener.accept().await.unwrap();
    let server = accept_async(stream).await.unwrap();
    (cmd_tx, server)
}

/// Push one message command through the client and read the resulting
/// frame server-side. Commands are FIFO, so once the frame shows up every
/// previously issued command (e.g. a subscription) has been processed.
async fn pump_message(
    cmd_tx: &mpsc::Sender<NetworkCommand>,
    server: &mut ServerSocket,
    text: &str,
) -> Value {
    cmd_tx
        .send(NetworkCommand::SendMessage(text.to_string()))
        .await
        .unwrap();
    let frame = timeout(WAIT, server.next())
        .await
        .expect("timed out waiting for frame")
        .unwrap()
        .unwrap();
    serde_json::from_str(frame.to_text().unwrap()).unwrap()
}

fn receive_message_frame(text: &str, sender: &str) -> Message {
    let frame = json!({
        "event": "receive_message",
        "data": { "message": text, "sender": sender },
    });
    Message::Text(frame.to_string())
}

#[tokio::test]
async fn send_command_emits_send_message_frame() {
    let (cmd_tx, mut server) = connect_pair().await;

    let value = pump_message(&cmd_tx, &mut server, "hello").await;
    assert_eq!(value["event"], "send_message");
    assert_eq!(value["data"]["message"], "hello");
}

#[tokio::test]
async fn inbound_frames_become_events_in_delivery_order() {
    let (cmd_tx, mut server) = connect_pair().await;
    let mut events = subscribe(&cmd_tx);
    pump_message(&cmd_tx, &mut server, "Hi").await;

    server
        .send(Message::Text(json!({ "event": "bot_typing" }).to_string()))
        .await
        .unwrap();
    server
        .send(receive_message_frame("Hello! How can I help?", "bot"))
        .await
        .unwrap();

    let first = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    assert!(matches!(first, NetworkEvent::BotTyping));

    let second = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    match second {
        NetworkEvent::MessageReceived(message) => {
            assert_eq!(message.text, "Hello! How can I help?");
            assert_eq!(message.sender, "bot");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn resubscribing_replaces_the_previous_subscription() {
    let (cmd_tx, mut server) = connect_pair().await;

    let mut stale = subscribe(&cmd_tx);
    let mut live = subscribe(&cmd_tx);
    pump_message(&cmd_tx, &mut server, "marker").await;

    server
        .send(receive_message_frame("hi there", "bot"))
        .await
        .unwrap();

    // Exactly one delivery, on the live subscription only.
    let event = timeout(WAIT, live.recv()).await.unwrap().unwrap();
    assert!(matches!(event, NetworkEvent::MessageReceived(_)));
    assert!(live.try_recv().is_err());

    // The stale receiver's sender was dropped on replacement; it never
    // sees the event.
    assert!(timeout(WAIT, stale.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn unrecognized_frames_are_skipped_without_dropping_the_connection() {
    let (cmd_tx, mut server) = connect_pair().await;
    let mut events = subscribe(&cmd_tx);
    pump_message(&cmd_tx, &mut server, "marker").await;

    server
        .send(Message::Text("definitely not json".to_string()))
        .await
        .unwrap();
    server
        .send(receive_message_frame("still here", "bot"))
        .await
        .unwrap();

    let event = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    match event {
        NetworkEvent::MessageReceived(message) => assert_eq!(message.text, "still here"),
        other => panic!("unexpected event: {other:?}"),
    }
}
