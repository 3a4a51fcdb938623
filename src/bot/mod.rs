//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: Handles incoming text, photo, and document messages
//! - `ui_builder`: Formats replies from pipeline outcomes

pub mod message_handler;
pub mod ui_builder;

// Re-export main handler function for use in main.rs
pub use message_handler::message_handler;

pub use message_handler::{command_name, download_and_process_image, download_image};
pub use ui_builder::{format_outcome, help_message, welcome_message};
