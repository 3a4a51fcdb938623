//! # Affiliate Telegram Bot
//!
//! A Telegram bot that describes product photos with an image captioning
//! service and replies with an Amazon affiliate search link for the first
//! caption.

pub mod affiliate;
pub mod bot;
pub mod config;
pub mod errors;
pub mod image_payload;
pub mod localization;
pub mod pipeline;
pub mod recognition;
