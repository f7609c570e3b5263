use crate::common::types::Message;

/// Events sent from the chat worker back to the UI.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A request settled. Carries either the real reply or a synthesized
    /// error message; exactly one is emitted per `SendMessage`.
    ReplyReady(Message),
}
