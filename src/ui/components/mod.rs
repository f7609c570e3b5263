pub mod chat_area;
pub mod confirm_dialog;
pub mod debug_panel;
pub mod header;
pub mod input_bar;
