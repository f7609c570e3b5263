use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent};

use super::client::ChatClient;

/// Background task that turns UI commands into HTTP exchanges.
pub struct ChatWorker {
    client: ChatClient,
    event_sender: mpsc::Sender<ChatEvent>,
    command_receiver: mpsc::Receiver<ChatCommand>,
}

impl ChatWorker {
    pub fn new(
        client: ChatClient,
        event_sender: mpsc::Sender<ChatEvent>,
        command_receiver: mpsc::Receiver<ChatCommand>,
    ) -> Self {
        Self {
            client,
            event_sender,
            command_receiver,
        }
    }

    /// Runs until the UI drops its command sender.
    pub async fn run(mut self) {
        log::info!("Chat worker started for {}", self.client.endpoint());

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command);
        }

        log::info!("Chat worker stopped");
    }

    fn handle_command(&self, command: ChatCommand) {
        match command {
            ChatCommand::SendMessage(text) => {
                // One task per request: replies land in completion order.
                let client = self.client.clone();
                let event_sender = self.event_sender.clone();
                tokio::spawn(async move {
                    let reply = client.exchange(&text).await;
                    if let Err(err) = event_sender.send(ChatEvent::ReplyReady(reply)).await {
                        log::warn!("Failed to deliver reply to UI: {err}");
                    }
                    log::info!("Chat request finished");
                });
            }
        }
    }
}
