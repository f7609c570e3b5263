pub mod app;
pub mod components;
pub mod guard;
pub mod state;

pub use app::ChatApp;
