/// Commands sent from the UI to the chat worker.
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// POST the text to the chat endpoint, exactly as typed.
    SendMessage(String),
}
