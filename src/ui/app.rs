use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent};
use crate::config::Environment;
use crate::storage::KeyValueStorage;
use crate::store::ConversationStore;

use super::components::{chat_area, confirm_dialog, debug_panel::DebugPanel, header, input_bar};
use super::guard::FallbackGuard;
use super::state::AppState;

pub struct ChatApp<S> {
    state: AppState<S>,
    guard: FallbackGuard,
    debug_panel: DebugPanel,
    environment: Environment,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<ChatEvent>,
}

impl<S: KeyValueStorage> ChatApp<S> {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: ConversationStore<S>,
        environment: Environment,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<ChatEvent>,
    ) -> Self {
        Self {
            state: AppState::new(store),
            guard: FallbackGuard::default(),
            debug_panel: DebugPanel::new("Chat App State"),
            environment,
            command_sender,
            event_receiver,
        }
    }

    fn handle_chat_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChatEvent::ReplyReady(reply) => self.state.apply_reply(reply),
            }
        }
    }
}

#[derive(Default)]
struct ShellActions {
    submit: bool,
    clear_requested: bool,
    clear_answer: Option<bool>,
}

fn render_shell<S: KeyValueStorage>(
    ctx: &egui::Context,
    state: &mut AppState<S>,
) -> ShellActions {
    let mut actions = ShellActions::default();
    let scroll_to_bottom = state.take_scroll_request();

    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        ui.add_space(4.0);
        actions.clear_requested = header::render(ui);
        ui.add_space(4.0);
    });

    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        ui.add_space(6.0);
        actions.submit = input_bar::render(ui, &mut state.input_text, state.loading);
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        chat_area::render(ui, state.store.messages(), state.loading, scroll_to_bottom);
    });

    if state.confirm_clear {
        actions.clear_answer = confirm_dialog::render(ctx, "Clear all chat history?");
    }

    actions
}

impl<S: KeyValueStorage> eframe::App for ChatApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_chat_events();

        let Self { guard, state, .. } = self;
        if let Some(actions) = guard.show(ctx, |ctx| render_shell(ctx, state)) {
            if actions.clear_requested {
                self.state.request_clear();
            }
            if let Some(confirmed) = actions.clear_answer {
                self.state.resolve_clear(confirmed);
            }
            if actions.submit
                && let Some(text) = self.state.take_submission()
            {
                self.state.dispatch(text, &self.command_sender);
            }
        }

        if !self.guard.is_degraded() {
            let snapshot = self.state.debug_snapshot();
            self.debug_panel.show(ctx, self.environment, &snapshot);
        }

        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Message;
    use crate::storage::MemoryStorage;
    use crate::ui::guard::GuardState;
    use std::cell::Cell;

    fn failing_bubble(_ui: &mut egui::Ui) {
        panic!("bubble failed");
    }

    #[test]
    fn message_list_failure_is_not_undone_by_later_changes() {
        let mut state = AppState::new(ConversationStore::new(MemoryStorage::new()));
        state.store.append(Message::user("hi"));
        let mut guard: FallbackGuard = FallbackGuard::default();
        let ctx = egui::Context::default();
        let renders = Cell::new(0);

        let frame = |guard: &mut FallbackGuard, state: &mut AppState<MemoryStorage>| {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                let _ = guard.show(ctx, |ctx| {
                    renders.set(renders.get() + 1);
                    let actions = render_shell(ctx, state);
                    egui::Window::new("messages").show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, failing_bubble);
                    });
                    actions
                });
            });
        };

        frame(&mut guard, &mut state);
        state.store.append(Message::assistant("unrelated"));
        state.input_text = "typing".to_string();
        frame(&mut guard, &mut state);
        frame(&mut guard, &mut state);

        assert_eq!(renders.get(), 1);
        assert_eq!(
            guard.state(),
            &GuardState::Degraded {
                description: "bubble failed".to_string()
            }
        );
    }
}
