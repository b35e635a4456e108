use tokio::sync::mpsc;

use crate::common::NetworkEvent;

/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    SendMessage(String),
    /// Install this sender as the one live event subscription, replacing
    /// whichever subscription the client currently serves.
    Subscribe(mpsc::Sender<NetworkEvent>),
}
