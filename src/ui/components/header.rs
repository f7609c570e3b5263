use eframe::egui;

/// Title bar. Returns true when "Clear chat" was clicked.
pub fn render(ui: &mut egui::Ui) -> bool {
    let mut clear = false;
    ui.horizontal(|ui| {
        ui.heading("AI Chat Assistant");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            clear = ui.button("Clear chat").clicked();
        });
    });
    clear
}
