use serde::Serialize;
use tokio::sync::mpsc;

use crate::common::{ChatCommand, Message};
use crate::network::client::error_reply;
use crate::storage::KeyValueStorage;
use crate::store::ConversationStore;

/// What the diagnostic overlay shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshot {
    pub messages_count: usize,
    pub current_input: String,
    pub is_loading: bool,
    pub last_message: Option<Message>,
}

/// Local UI state.
pub struct AppState<S> {
    pub store: ConversationStore<S>,
    pub input_text: String,
    pub loading: bool,
    pub confirm_clear: bool,
    seen_revision: Option<u64>,
}

impl<S: KeyValueStorage> AppState<S> {
    /// Builds the state and rehydrates saved history.
    pub fn new(mut store: ConversationStore<S>) -> Self {
        store.load();
        Self {
            store,
            input_text: String::new(),
            loading: false,
            confirm_clear: false,
            seen_revision: None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input_text.trim().is_empty()
    }

    /// Take the pending input for sending. Appends the user's message and
    /// enters the loading state; returns `None` when the input is blank or a
    /// request is already outstanding.
    pub fn take_submission(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.input_text);
        log::info!("Sending user message: {text}");
        self.store.append(Message::user(text.clone()));
        self.loading = true;
        Some(text)
    }

    /// Hand a taken submission to the chat worker. If the worker cannot take
    /// it, the request is settled right away with an error reply.
    pub fn dispatch(&mut self, text: String, command_sender: &mpsc::Sender<ChatCommand>) {
        if let Err(err) = command_sender.try_send(ChatCommand::SendMessage(text)) {
            log::warn!("Failed to send command to chat worker: {err}");
            self.apply_reply(Message::assistant(error_reply(&err.to_string())));
        }
    }

    /// Settle the outstanding request with its reply or error message.
    pub fn apply_reply(&mut self, reply: Message) {
        self.store.append(reply);
        self.loading = false;
    }

    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    pub fn resolve_clear(&mut self, confirmed: bool) {
        self.confirm_clear = false;
        if confirmed {
            log::info!("Clearing chat history");
            self.store.clear();
        }
    }

    /// True once per change of the message sequence, including the first
    /// frame.
    pub fn take_scroll_request(&mut self) -> bool {
        let revision = self.store.revision();
        if self.seen_revision == Some(revision) {
            return false;
        }
        self.seen_revision = Some(revision);
        true
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            messages_count: self.store.len(),
            current_input: self.input_text.clone(),
            is_loading: self.loading,
            last_message: self.store.last().cloned(),
        }
    }
}
