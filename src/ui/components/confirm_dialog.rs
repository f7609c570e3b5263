use eframe::egui;

/// Modal yes/no prompt. Returns `Some(answer)` once the user picks one.
pub fn render(ctx: &egui::Context, question: &str) -> Option<bool> {
    let mut answer = None;

    egui::Window::new("Please confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.label(question);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    answer
}
