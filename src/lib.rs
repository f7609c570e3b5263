//! Desktop chat client: an egui front end that posts each message to a chat
//! endpoint and keeps the conversation in local storage.

pub mod common;
pub mod config;
pub mod error;
pub mod network;
pub mod storage;
pub mod store;
pub mod ui;
