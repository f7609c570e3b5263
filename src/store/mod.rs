pub mod conversation;

pub use conversation::{ConversationStore, DEFAULT_STORAGE_KEY};
