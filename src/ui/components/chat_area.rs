use eframe::egui;

use crate::common::ChatMessage;
use crate::common::types::LOCAL_SENDER;
use crate::ui::state::{AppState, TypingState};

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height(384.0)
        .show(ui, |ui| {
            for message in &state.messages {
                render_message(ui, message);
            }
            if state.typing == TypingState::Typing {
                render_typing_row(ui);
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let from_user = message.sender == LOCAL_SENDER;

    ui.horizontal(|ui| {
        if from_user {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(egui::Color32::LIGHT_BLUE, &message.text);
                ui.label(egui::RichText::new(format_time(message.timestamp)).weak());
            });
        } else {
            ui.colored_label(egui::Color32::LIGHT_GRAY, &message.text);
            ui.label(egui::RichText::new(format_time(message.timestamp)).weak());
        }
    });
}

fn render_typing_row(ui: &mut egui::Ui) {
    // Decorative dot cycle; the app requests a repaint every frame so the
    // phase advances while the indicator is up.
    let time = ui.ctx().input(|i| i.time);
    let dots = match ((time * 2.0) as usize) % 4 {
        0 => ".",
        1 => "..",
        2 => "...",
        _ => "",
    };
    ui.label(
        egui::RichText::new(format!("Bot is typing{dots}"))
            .weak()
            .italics(),
    );
}

fn format_time(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}
