pub mod client;
pub mod worker;

pub use client::ChatClient;
pub use worker::ChatWorker;
