//! UI Builder module for formatting bot replies

use crate::errors::PipelineError;
use crate::localization::{t_args_lang, t_lang};
use crate::pipeline::{PipelineOutcome, PipelineResult};

/// Reply for the /start command
pub fn welcome_message(language_code: Option<&str>) -> String {
    format!(
        "👋 {}\n\n{}\n\n{}",
        t_lang("welcome-title", language_code),
        t_lang("welcome-description", language_code),
        t_lang("welcome-help", language_code)
    )
}

/// Reply for the /help command
pub fn help_message(language_code: Option<&str>) -> String {
    [
        "help-title",
        "help-step1",
        "help-step2",
        "help-step3",
        "help-commands",
    ]
    .iter()
    .map(|key| t_lang(key, language_code))
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// Turn a pipeline result into the text sent back to the user
pub fn format_outcome(result: &PipelineResult, language_code: Option<&str>) -> String {
    match result {
        Ok(PipelineOutcome::LinkBuilt(link)) => t_args_lang(
            "link-found",
            &[("keyword", link.keyword.as_str()), ("url", link.url.as_str())],
            language_code,
        ),
        Ok(PipelineOutcome::NoMatchFound) => t_lang("no-match-found", language_code),
        Err(PipelineError::Configuration(_)) => t_lang("error-not-configured", language_code),
        Err(PipelineError::Recognition(_)) | Err(PipelineError::Link(_)) => {
            t_lang("error-recognition", language_code)
        }
    }
}
