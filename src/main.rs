use std::error::Error;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use rust_ai_chat::config::{self, AppConfig, Environment};
use rust_ai_chat::network::{ChatClient, ChatWorker};
use rust_ai_chat::storage::SqliteStorage;
use rust_ai_chat::store::ConversationStore;
use rust_ai_chat::ui::ChatApp;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "rust_ai_chat", version, about = "Desktop AI chat client")]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Chat endpoint URL, overrides config and environment
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
    /// Show or hide developer diagnostics
    #[arg(long, value_enum)]
    environment: Option<Environment>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = resolve_config(&cli);
    log::info!(
        "Starting chat client against {} ({:?})",
        app_config.endpoint,
        app_config.environment
    );

    let storage = SqliteStorage::with_path(&app_config.database_path)?;
    let store = ConversationStore::with_key(storage, app_config.storage_key.clone());

    let timeout = app_config.request_timeout_secs.map(Duration::from_secs);
    let client = ChatClient::new(app_config.endpoint.clone(), timeout)?;

    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(ChatWorker::new(client, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions::default();
    let environment = app_config.environment;

    eframe::run_native(
        "AI Chat Assistant",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ChatApp::new(
                cc,
                store,
                environment,
                cmd_tx,
                event_rx,
            )))
        }),
    )?;

    Ok(())
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut app_config = config::load_config(&cli.config);
    config::apply_env_overrides(&mut app_config);

    if let Some(endpoint) = &cli.endpoint {
        app_config.endpoint = endpoint.clone();
    }
    if let Some(environment) = cli.environment {
        app_config.environment = environment;
    }

    app_config
}
