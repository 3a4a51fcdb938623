//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tracing::{debug, error, info, warn};

use crate::errors::PipelineError;
use crate::image_payload::ImagePayload;
use crate::localization::t_lang;
use crate::pipeline::{Pipeline, PipelineOutcome, PipelineResult};

use super::ui_builder::{format_outcome, help_message, welcome_message};

/// Download a Telegram file into a temporary image payload
///
/// Runs on the bot's own HTTP client, so the transfer is bounded by that
/// client's timeout.
pub async fn download_image(bot: &Bot, file_id: FileId) -> Result<ImagePayload> {
    let file = bot.get_file(file_id).await?;

    let mut bytes = Vec::new();
    bot.download_file(&file.path, &mut bytes).await?;

    Ok(ImagePayload::from_bytes(&bytes)?)
}

fn log_outcome(chat_id: ChatId, result: &PipelineResult) {
    match result {
        Ok(PipelineOutcome::LinkBuilt(link)) => {
            info!(user_id = %chat_id, keyword = %link.keyword, "Affiliate link sent")
        }
        Ok(PipelineOutcome::NoMatchFound) => {
            info!(user_id = %chat_id, "No recognizable objects in image")
        }
        Err(PipelineError::Configuration(e)) => {
            error!(user_id = %chat_id, error = %e, "Pipeline is not configured")
        }
        Err(e) => error!(user_id = %chat_id, error = %e, "Image recognition failed"),
    }
}

pub async fn download_and_process_image(
    bot: &Bot,
    file_id: FileId,
    chat_id: ChatId,
    pipeline: &Pipeline,
    language_code: Option<&str>,
) -> Result<()> {
    // Nothing is downloaded when the pipeline could not use it anyway
    if let Err(e) = pipeline.check_configuration() {
        let result: PipelineResult = Err(e.into());
        log_outcome(chat_id, &result);
        bot.send_message(chat_id, format_outcome(&result, language_code))
            .await?;
        return Ok(());
    }

    let payload = match download_image(bot, file_id).await {
        Ok(payload) => {
            debug!(user_id = %chat_id, temp_path = %payload.path().display(), "Image downloaded successfully");
            payload
        }
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to download image for user");
            bot.send_message(chat_id, t_lang("error-download-failed", language_code))
                .await?;
            return Err(e);
        }
    };

    bot.send_message(chat_id, t_lang("processing-photo", language_code))
        .await?;

    // The payload is released inside the pipeline on every path
    let result = pipeline.run(payload).await;
    log_outcome(chat_id, &result);

    bot.send_message(chat_id, format_outcome(&result, language_code))
        .await?;

    Ok(())
}

/// Command name of a message such as `/start@my_bot extra`
pub fn command_name(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    Some(command.split('@').next().unwrap_or(command))
}

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

async fn handle_text_message(bot: &Bot, msg: &Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let language_code = language_code(msg);
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    let reply = match command_name(text) {
        Some("start") => welcome_message(language_code),
        Some("help") => help_message(language_code),
        _ => t_lang("text-response", language_code),
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

async fn handle_photo_message(bot: &Bot, msg: &Message, pipeline: &Pipeline) -> Result<()> {
    let language_code = language_code(msg);
    debug!(user_id = %msg.chat.id, "Received photo message from user");

    // Telegram lists photo sizes smallest first
    if let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) {
        download_and_process_image(
            bot,
            largest_photo.file.id.clone(),
            msg.chat.id,
            pipeline,
            language_code,
        )
        .await?;
    }
    Ok(())
}

async fn handle_document_message(bot: &Bot, msg: &Message, pipeline: &Pipeline) -> Result<()> {
    let language_code = language_code(msg);

    let Some(doc) = msg.document() else {
        return Ok(());
    };

    match &doc.mime_type {
        Some(mime_type) if mime_type.to_string().starts_with("image/") => {
            debug!(user_id = %msg.chat.id, mime_type = %mime_type, "Received image document from user");
            download_and_process_image(bot, doc.file.id.clone(), msg.chat.id, pipeline, language_code)
                .await?;
        }
        Some(mime_type) => {
            warn!(user_id = %msg.chat.id, mime_type = %mime_type, "Received non-image document from user");
            bot.send_message(msg.chat.id, t_lang("error-unsupported-format", language_code))
                .await?;
        }
        None => {
            warn!(user_id = %msg.chat.id, "Received document without mime type from user");
            bot.send_message(msg.chat.id, t_lang("error-no-mime-type", language_code))
                .await?;
        }
    }
    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message, pipeline: Arc<Pipeline>) -> Result<()> {
    if msg.text().is_some() {
        handle_text_message(&bot, &msg).await?;
    } else if msg.photo().is_some() {
        handle_photo_message(&bot, &msg, &pipeline).await?;
    } else if msg.document().is_some() {
        handle_document_message(&bot, &msg, &pipeline).await?;
    } else {
        debug!(user_id = %msg.chat.id, "Received unsupported message type from user");
        bot.send_message(msg.chat.id, t_lang("text-response", language_code(&msg)))
            .await?;
    }

    Ok(())
}
