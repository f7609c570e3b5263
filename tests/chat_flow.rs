use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use rust_ai_chat::common::Message;
use rust_ai_chat::network::ChatClient;
use rust_ai_chat::storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
use rust_ai_chat::store::{ConversationStore, DEFAULT_STORAGE_KEY};
use rust_ai_chat::ui::state::AppState;
use serde_json::{Value, json};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat")
}

fn contents<S: KeyValueStorage>(state: &AppState<S>) -> Vec<(String, bool)> {
    state
        .store
        .messages()
        .iter()
        .map(|message| (message.content.clone(), message.is_user))
        .collect()
}

async fn round_trip<S: KeyValueStorage>(state: &mut AppState<S>, client: &ChatClient, text: &str) {
    state.input_text = text.to_string();
    let outgoing = state.take_submission().expect("input should be sendable");
    assert!(state.loading);
    let reply = client.exchange(&outgoing).await;
    state.apply_reply(reply);
    assert!(!state.loading);
}

#[tokio::test]
async fn successful_reply_is_appended_after_user_message() {
    let endpoint = spawn_backend(Router::new().route(
        "/chat",
        post(|Json(_): Json<Value>| async { Json(json!({"response": "ok"})) }),
    ))
    .await;
    let client = ChatClient::new(endpoint, None).unwrap();
    let mut state = AppState::new(ConversationStore::new(MemoryStorage::new()));

    round_trip(&mut state, &client, "hi").await;

    assert_eq!(
        contents(&state),
        vec![("hi".to_string(), true), ("ok".to_string(), false)]
    );
}

#[tokio::test]
async fn server_error_is_shown_as_assistant_message() {
    let endpoint = spawn_backend(Router::new().route(
        "/chat",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;
    let client = ChatClient::new(endpoint, None).unwrap();
    let mut state = AppState::new(ConversationStore::new(MemoryStorage::new()));

    round_trip(&mut state, &client, "hi").await;

    let messages = state.store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "hi");
    assert!(!messages[1].is_user);
    assert!(messages[1].content.contains("500"));
}

#[tokio::test]
async fn blank_input_never_reaches_the_backend() {
    let mut state = AppState::new(ConversationStore::new(MemoryStorage::new()));
    state.input_text = "   ".to_string();

    assert_eq!(state.take_submission(), None);
    assert!(state.store.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("chat.db");
    let endpoint = spawn_backend(Router::new().route(
        "/chat",
        post(|Json(body): Json<Value>| async move {
            Json(json!({"response": format!("echo {}", body["message"].as_str().unwrap_or(""))}))
        }),
    ))
    .await;
    let client = ChatClient::new(endpoint, None).unwrap();

    let before = {
        let storage = SqliteStorage::with_path(&db_path).unwrap();
        let mut state = AppState::new(ConversationStore::new(storage));
        round_trip(&mut state, &client, "one").await;
        round_trip(&mut state, &client, "two").await;
        state.store.messages().to_vec()
    };

    let storage = SqliteStorage::with_path(&db_path).unwrap();
    let state = AppState::new(ConversationStore::new(storage));
    assert_eq!(state.store.messages(), before.as_slice());
    assert_eq!(
        contents(&state),
        vec![
            ("one".to_string(), true),
            ("echo one".to_string(), false),
            ("two".to_string(), true),
            ("echo two".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn confirmed_clear_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("chat.db");

    {
        let storage = SqliteStorage::with_path(&db_path).unwrap();
        let mut state = AppState::new(ConversationStore::new(storage));
        state.store.append(Message::user("forget me"));
        state.request_clear();
        state.resolve_clear(true);
    }

    let storage = SqliteStorage::with_path(&db_path).unwrap();
    assert_eq!(storage.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    let state = AppState::new(ConversationStore::new(storage));
    assert!(state.store.is_empty());
}
