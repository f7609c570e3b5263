use eframe::egui;

use crate::config::Environment;
use crate::ui::state::DebugSnapshot;

const COLLAPSED_HEIGHT: f32 = 40.0;
const EXPANDED_HEIGHT: f32 = 500.0;
const MAX_WIDTH: f32 = 400.0;

/// Development-only overlay showing the shell's live state.
pub struct DebugPanel {
    title: String,
    is_open: bool,
}

impl DebugPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Draws nothing and returns `None` outside development.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        environment: Environment,
        snapshot: &DebugSnapshot,
    ) -> Option<egui::Response> {
        if !environment.is_development() {
            return None;
        }

        let max_height = if self.is_open {
            EXPANDED_HEIGHT
        } else {
            COLLAPSED_HEIGHT
        };

        let area = egui::Area::new(egui::Id::new("debug_panel"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(0xf8, 0xf9, 0xfa))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(0xde, 0xe2, 0xe6)))
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_max_width(MAX_WIDTH);
                        ui.set_max_height(max_height);
                        self.contents(ui, snapshot);
                    });
            });

        Some(area.response)
    }

    fn contents(&mut self, ui: &mut egui::Ui, snapshot: &DebugSnapshot) {
        let arrow = if self.is_open { "▼" } else { "▲" };
        let header = ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  {arrow}", self.title))
                    .strong()
                    .color(egui::Color32::BLACK),
            )
            .sense(egui::Sense::click()),
        );
        if header.clicked() {
            self.toggle();
        }

        if self.is_open {
            ui.add_space(10.0);
            let pretty = serde_json::to_string_pretty(snapshot)
                .unwrap_or_else(|err| format!("<unserializable state: {err}>"));
            egui::ScrollArea::vertical()
                .id_salt("debug_panel_state")
                .max_height(EXPANDED_HEIGHT - COLLAPSED_HEIGHT)
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(pretty)
                            .monospace()
                            .size(12.0)
                            .color(egui::Color32::BLACK),
                    );
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Message;

    fn snapshot() -> DebugSnapshot {
        DebugSnapshot {
            messages_count: 1,
            current_input: "draft".to_string(),
            is_loading: true,
            last_message: Some(Message::user("hi")),
        }
    }

    fn frame(panel: &mut DebugPanel, environment: Environment) -> (Option<egui::Response>, usize) {
        let ctx = egui::Context::default();
        let mut response = None;
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            response = panel.show(ctx, environment, &snapshot());
        });
        (response, output.shapes.len())
    }

    #[test]
    fn hidden_outside_development() {
        let mut panel = DebugPanel::new("Chat App State");
        panel.toggle();

        let (response, shapes) = frame(&mut panel, Environment::Production);
        assert!(response.is_none());
        assert_eq!(shapes, 0);
    }

    #[test]
    fn shown_in_development() {
        let mut panel = DebugPanel::new("Chat App State");

        let (response, shapes) = frame(&mut panel, Environment::Development);
        assert!(response.is_some());
        assert!(shapes > 0);
    }

    #[test]
    fn toggles_between_collapsed_and_expanded() {
        let mut panel = DebugPanel::new("Chat App State");
        assert!(!panel.is_open());
        panel.toggle();
        assert!(panel.is_open());
        panel.toggle();
        assert!(!panel.is_open());
    }
}
