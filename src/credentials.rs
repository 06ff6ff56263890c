//! API-key resolution: environment variable first, token file second.
//!
//! The precedence is fixed: an explicit key in the config wins, then the
//! environment variable, then the per-user token file. When the
//! environment variable holds a non-empty value the file is never touched,
//! so a broken or unreadable token file cannot interfere with an
//! environment-configured run.
//!
//! "File missing" and "file unreadable" are different answers: the first
//! means the user has not set anything up and gets the actionable
//! [`SummarizeError::CredentialNotFound`] naming both sources; the second
//! is an I/O problem surfaced verbatim as
//! [`SummarizeError::CredentialIo`].

use crate::config::SummarizeConfig;
use crate::error::SummarizeError;
use tracing::debug;

/// Resolve the API key for this run.
///
/// Sources, in order:
/// 1. `config.api_key` (explicit override)
/// 2. the environment variable named by `config.api_key_env`
/// 3. the token file at [`SummarizeConfig::token_file_path`], trimmed
pub async fn resolve(config: &SummarizeConfig) -> Result<String, SummarizeError> {
    if let Some(ref key) = config.api_key {
        debug!("using API key from config");
        return Ok(key.clone());
    }

    if let Ok(value) = std::env::var(&config.api_key_env) {
        if !value.is_empty() {
            debug!("using API key from ${}", config.api_key_env);
            return Ok(value);
        }
    }

    let token_file = config.token_file_path();
    match tokio::fs::read_to_string(&token_file).await {
        Ok(contents) => {
            let token = contents.trim();
            if token.is_empty() {
                // A blank file is indistinguishable from "not set up".
                Err(SummarizeError::CredentialNotFound {
                    env_var: config.api_key_env.clone(),
                    token_file,
                })
            } else {
                debug!("using API key from {}", token_file.display());
                Ok(token.to_string())
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SummarizeError::CredentialNotFound {
                env_var: config.api_key_env.clone(),
                token_file,
            })
        }
        Err(e) => Err(SummarizeError::CredentialIo {
            path: token_file,
            source: e,
        }),
    }
}
