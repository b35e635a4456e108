use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};
use crate::network;

use super::components::{chat_area, input_bar};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<NetworkCommand>,
    ) -> Self {
        // The subscription lives exactly as long as this widget: the
        // receiver drops with it, and a later activation installs its own.
        let event_receiver = network::subscribe(&command_sender);
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn send_command(&mut self, payload: String) {
        if let Err(err) = self
            .command_sender
            .try_send(NetworkCommand::SendMessage(payload))
        {
            log::warn!("Failed to send command to network: {err}");
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chatbot Assistant");
            ui.separator();
            chat_area::render(ui, &self.state);

            ui.separator();
            if input_bar::render(ui, &mut self.state.input_text) {
                if let Some(content) = self.state.submit() {
                    self.send_command(content);
                }
            }
        });

        ctx.request_repaint();
    }
}
