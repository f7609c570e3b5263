use eframe::egui;

/// Draws the input row. Returns true when the user asked to send, by button
/// or Enter; the caller decides whether the text is sendable.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, loading: bool) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        let button_label = if loading { "Sending..." } else { "Send" };
        let button_width = 90.0;
        let field_width = (ui.available_width() - button_width - 8.0).max(80.0);

        let response = ui.add_enabled(
            !loading,
            egui::TextEdit::singleline(input_text)
                .hint_text("Type a message...")
                .desired_width(field_width),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }

        let can_send = !loading && !input_text.trim().is_empty();
        if ui
            .add_enabled(can_send, egui::Button::new(button_label).min_size(egui::vec2(button_width, 0.0)))
            .clicked()
        {
            send = true;
        }
    });

    send
}
