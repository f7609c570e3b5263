use chrono::Local;
use eframe::egui;

use crate::common::Message;

const USER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x6f, 0xd9);
const ASSISTANT_BUBBLE: egui::Color32 = egui::Color32::from_rgb(0x3a, 0x3f, 0x47);

pub fn render(ui: &mut egui::Ui, messages: &[Message], loading: bool, scroll_to_bottom: bool) {
    egui::ScrollArea::vertical()
        .id_salt("chat_messages")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if messages.is_empty() && !loading {
                welcome(ui);
            }

            for message in messages {
                bubble(ui, message.is_user, |ui| {
                    ui.label(egui::RichText::new(&message.content).color(egui::Color32::WHITE));
                    ui.label(
                        egui::RichText::new(format_time(message))
                            .small()
                            .color(egui::Color32::LIGHT_GRAY),
                    );
                });
            }

            if loading {
                bubble(ui, false, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Typing...").color(egui::Color32::WHITE));
                    });
                });
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn welcome(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Welcome to AI Chat Assistant");
        ui.label("Type your question below and the assistant will answer.");
    });
}

fn bubble(ui: &mut egui::Ui, is_user: bool, content: impl FnOnce(&mut egui::Ui)) {
    let layout = if is_user {
        egui::Layout::right_to_left(egui::Align::Min)
    } else {
        egui::Layout::left_to_right(egui::Align::Min)
    };

    ui.with_layout(layout, |ui| {
        let max_width = ui.available_width() * 0.7;
        egui::Frame::new()
            .fill(if is_user { USER_BUBBLE } else { ASSISTANT_BUBBLE })
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(content);
            });
    });
    ui.add_space(6.0);
}

/// Local wall-clock time, hours and minutes.
pub fn format_time(message: &Message) -> String {
    message.timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
