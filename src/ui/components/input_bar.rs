use eframe::egui;

/// Render the draft field and send button. Returns `true` when the user
/// asked to send; the caller decides whether the draft actually commits.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(egui::TextEdit::singleline(input_text).hint_text("Type a message..."));
        if ui.button("Send").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });
    send
}
