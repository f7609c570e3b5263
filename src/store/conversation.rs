use crate::common::Message;
use crate::storage::KeyValueStorage;

pub const DEFAULT_STORAGE_KEY: &str = "chatHistory";

/// Ordered, append-only chat history mirrored into durable storage.
pub struct ConversationStore<S> {
    messages: Vec<Message>,
    storage: S,
    key: String,
    revision: u64,
}

impl<S: KeyValueStorage> ConversationStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            storage,
            key: key.into(),
            revision: 0,
        }
    }

    /// Replace the in-memory history with the persisted copy, if any.
    ///
    /// Missing or unreadable history leaves the store empty; this never fails.
    pub fn load(&mut self) {
        log::info!("Loading chat history from storage key `{}`", self.key);
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No saved chat history found");
                return;
            }
            Err(err) => {
                log::error!("Failed to read chat history: {err}");
                return;
            }
        };

        match decode_history(&raw) {
            Ok(messages) => {
                log::info!("Loaded {} messages from chat history", messages.len());
                self.messages = messages;
                self.revision += 1;
            }
            Err(err) => {
                log::error!("Failed to parse saved messages: {err}");
            }
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
        self.persist();
    }

    /// Drop every message and the persisted copy. Callers confirm with the
    /// user first.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.revision += 1;
        if let Err(err) = self.storage.remove(&self.key) {
            log::error!("Failed to remove chat history: {err}");
        }
    }

    /// Write the full history under the storage key. An empty history is not
    /// written, so a cleared conversation stays absent from storage.
    pub fn persist(&mut self) {
        if self.messages.is_empty() {
            return;
        }

        let encoded = match serde_json::to_string(&self.messages) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::error!("Failed to encode chat history: {err}");
                return;
            }
        };

        log::debug!("Saving {} messages to storage", self.messages.len());
        if let Err(err) = self.storage.set(&self.key, &encoded) {
            log::error!("Failed to save chat history: {err}");
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Bumped on every change to the message sequence.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Decode a persisted history. Entries that are not messages are skipped so
/// one damaged record does not discard the rest.
fn decode_history(raw: &str) -> Result<Vec<Message>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = entries.len();

    let messages: Vec<Message> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(message) => Some(message),
            Err(err) => {
                log::warn!("Skipping unreadable saved message: {err}");
                None
            }
        })
        .collect();

    if messages.len() < total {
        log::warn!("Recovered {} of {} saved messages", messages.len(), total);
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn stored(store: &ConversationStore<MemoryStorage>) -> Option<String> {
        store.storage().get(DEFAULT_STORAGE_KEY).unwrap()
    }

    #[test]
    fn append_persists_in_order() {
        let mut store = ConversationStore::new(MemoryStorage::new());
        store.append(Message::user("first"));
        store.append(Message::assistant("second"));
        store.append(Message::user("third"));

        let decoded: Vec<Message> = serde_json::from_str(&stored(&store).unwrap()).unwrap();
        let pairs: Vec<_> = decoded
            .iter()
            .map(|message| (message.content.as_str(), message.is_user))
            .collect();

        assert_eq!(
            pairs,
            vec![("first", true), ("second", false), ("third", true)]
        );
        assert_eq!(decoded, store.messages());
    }

    #[test]
    fn clear_empties_memory_and_storage() {
        let mut store = ConversationStore::new(MemoryStorage::new());
        store.append(Message::user("hi"));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn empty_history_is_never_written() {
        let mut store = ConversationStore::new(MemoryStorage::new());
        store.append(Message::user("hi"));
        store.clear();
        store.persist();

        assert_eq!(stored(&store), None);
    }

    #[test]
    fn load_restores_previous_session() {
        let mut first = ConversationStore::new(MemoryStorage::new());
        first.append(Message::user("hi"));
        first.append(Message::assistant("hello"));
        let storage = first.storage().clone();

        let mut second = ConversationStore::new(storage);
        second.load();

        assert_eq!(second.messages(), first.messages());
    }

    #[test]
    fn load_without_history_stays_empty() {
        let mut store = ConversationStore::new(MemoryStorage::new());
        store.load();

        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn corrupt_history_loads_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();

        let mut store = ConversationStore::new(storage);
        store.load();

        assert!(store.is_empty());
    }

    #[test]
    fn damaged_entries_do_not_discard_the_rest() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[
                    {"content":"kept","isUser":true,"timestamp":"not a date"},
                    {"isUser":false},
                    {"content":"also kept","isUser":false,"timestamp":"2024-01-01T00:00:00Z"}
                ]"#,
            )
            .unwrap();

        let mut store = ConversationStore::new(storage);
        store.load();

        let contents: Vec<_> = store
            .messages()
            .iter()
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(contents, vec!["kept", "also kept"]);
    }

    #[test]
    fn revision_tracks_sequence_changes() {
        let mut store = ConversationStore::new(MemoryStorage::new());
        store.append(Message::user("a"));
        store.persist();
        assert_eq!(store.revision(), 1);

        store.clear();
        assert_eq!(store.revision(), 2);
    }
}
