use std::error::Error;
use std::time::Duration;

use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::{NetworkCommand, NetworkEvent};

use super::protocol;

const EVENT_CHANNEL_CAPACITY: usize = 100;
const MAX_CONNECT_ATTEMPTS: u32 = 5;
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, Message>;

/// Open a fresh event subscription on the socket client, replacing
/// whichever subscription it currently serves. Dropping the returned
/// receiver releases the subscription.
pub fn subscribe(command_sender: &mpsc::Sender<NetworkCommand>) -> mpsc::Receiver<NetworkEvent> {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    if let Err(err) = command_sender.try_send(NetworkCommand::Subscribe(event_tx)) {
        log::warn!("Failed to subscribe to network events: {err}");
    }
    event_rx
}

enum ConnectionEnd {
    Reconnect,
    Shutdown,
}

pub struct SocketClient {
    command_receiver: mpsc::Receiver<NetworkCommand>,
    subscriber: Option<mpsc::Sender<NetworkEvent>>,
    socket_url: String,
}

impl SocketClient {
    pub fn new(command_receiver: mpsc::Receiver<NetworkCommand>, socket_url: String) -> Self {
        Self {
            command_receiver,
            subscriber: None,
            socket_url,
        }
    }

    pub async fn run(mut self) -> Result<(), Box<dyn Error>> {
        let mut reconnect_delay = Duration::from_secs(1);
        let mut failed_attempts = 0u32;

        loop {
            match connect_async(&self.socket_url).await {
                Ok((socket, response)) => {
                    log::info!(
                        "Connected to {} (status {:?})",
                        self.socket_url,
                        response.status()
                    );
                    reconnect_delay = Duration::from_secs(1);
                    failed_attempts = 0;

                    if let ConnectionEnd::Shutdown = self.drive_connection(socket).await {
                        return Ok(());
                    }
                    log::warn!("Connection lost; reconnecting");
                }
                Err(err) => {
                    failed_attempts += 1;
                    log::warn!(
                        "Failed to connect to {} (attempt {failed_attempts}): {err}",
                        self.socket_url
                    );
                    if failed_attempts >= MAX_CONNECT_ATTEMPTS {
                        return Err(format!(
                            "giving up on {} after {failed_attempts} connection attempts",
                            self.socket_url
                        )
                        .into());
                    }
                }
            }

            if let ConnectionEnd::Shutdown = self.wait_before_reconnect(reconnect_delay).await {
                return Ok(());
            }
            reconnect_delay = (reconnect_delay * 2).min(MAX_RECONNECT_DELAY);
        }
    }

    /// Pump commands and socket frames until the connection or the command
    /// channel goes away.
    async fn drive_connection(&mut self, socket: Socket) -> ConnectionEnd {
        let (mut write, mut read) = socket.split();

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => {
                            if let Err(err) = self.handle_command(command, &mut write).await {
                                log::warn!("Failed to send frame: {err}");
                                return ConnectionEnd::Reconnect;
                            }
                        }
                        None => return ConnectionEnd::Shutdown,
                    }
                }
                frame = read.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => match protocol::decode_event(&text) {
                            Some(event) => self.forward_event(event).await,
                            None => log::debug!("Ignoring unrecognized frame: {text}"),
                        },
                        Some(Ok(Message::Ping(payload))) => {
                            if let Err(err) = write.send(Message::Pong(payload)).await {
                                log::warn!("Failed to answer ping: {err}");
                                return ConnectionEnd::Reconnect;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Connection closed by server");
                            return ConnectionEnd::Reconnect;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            log::warn!("Socket read error: {err}");
                            return ConnectionEnd::Reconnect;
                        }
                    }
                }
            }
        }
    }

    async fn handle_command(
        &mut self,
        command: NetworkCommand,
        write: &mut SocketSink,
    ) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        match command {
            NetworkCommand::SendMessage(text) => match protocol::encode_send_message(&text) {
                Ok(frame) => write.send(Message::Text(frame)).await?,
                Err(err) => log::warn!("Failed to serialize message: {err}"),
            },
            NetworkCommand::Subscribe(sender) => self.subscriber = Some(sender),
        }
        Ok(())
    }

    async fn forward_event(&mut self, event: NetworkEvent) {
        if let Some(sender) = self.subscriber.clone() {
            if sender.send(event).await.is_err() {
                log::debug!("Event subscriber dropped; releasing subscription");
                self.subscriber = None;
            }
        }
    }

    /// Sit out the reconnect delay. Messages submitted while disconnected
    /// are dropped, not queued; subscriptions are still honored.
    async fn wait_before_reconnect(&mut self, delay: Duration) -> ConnectionEnd {
        let sleep = sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return ConnectionEnd::Reconnect,
                command = self.command_receiver.recv() => {
                    match command {
                        Some(NetworkCommand::SendMessage(_)) => {
                            log::warn!("Not connected; dropping outbound message");
                        }
                        Some(NetworkCommand::Subscribe(sender)) => self.subscriber = Some(sender),
                        None => return ConnectionEnd::Shutdown,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
