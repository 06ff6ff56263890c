//! Configuration types for the summarization pipeline.
//!
//! All pipeline behaviour is controlled through [`SummarizeConfig`], built
//! via its [`SummarizeConfigBuilder`]. Keeping every knob in one struct
//! means nothing in the pipeline reads process-wide globals: the model
//! name, the credential sources, and the backend endpoints are all values
//! handed to the driver at construction time, which is what makes the
//! pipeline testable against stand-in backends.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults
//! for the rest; adding a field never breaks an existing call site.

use crate::backend::{CitationSource, TextGenerator};
use crate::error::SummarizeError;
use crate::progress::PipelineObserver;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default environment variable consulted for the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Base URL of the Gemini generative-language API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Base URL of the Crossref REST API.
pub const DEFAULT_CROSSREF_BASE_URL: &str = "https://api.crossref.org";

/// Configuration for one summarization run.
///
/// Built via [`SummarizeConfig::builder()`] or [`SummarizeConfig::default()`].
///
/// # Example
/// ```rust
/// use pdfsum::SummarizeConfig;
///
/// let config = SummarizeConfig::builder()
///     .model("gemini-2.0-flash")
///     .lookup_citation(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Gemini model ID, e.g. "gemini-2.0-flash".
    ///
    /// `None` asks the backend which models it offers, picks the first
    /// one that supports `generateContent`, and announces the choice in
    /// the log.
    pub model: Option<String>,

    /// Explicit API key. Takes precedence over both the environment
    /// variable and the token file when set.
    pub api_key: Option<String>,

    /// Name of the environment variable consulted for the API key.
    /// Default: `GOOGLE_API_KEY`.
    pub api_key_env: String,

    /// Fallback credential file. `None` means `~/.config/gemini.token`.
    pub token_file: Option<PathBuf>,

    /// Base URL of the generative-model API. Overridable so tests can
    /// point the real client at a local server.
    pub gemini_base_url: String,

    /// Base URL of the citation-metadata API.
    pub crossref_base_url: String,

    /// Whether to attempt the bibliographic lookup at all. Default: true.
    pub lookup_citation: bool,

    /// Contact e-mail forwarded to Crossref.
    ///
    /// Requests carrying a `mailto` get routed to Crossref's "polite"
    /// server pool, which has better latency and laxer rate limits than
    /// the anonymous pool.
    pub mailto: Option<String>,

    /// Sampling temperature for the summary generation. Default: 0.2.
    ///
    /// Low temperature keeps the model close to what the document actually
    /// says; higher values invite embellished synopses.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 1024.
    ///
    /// A title, an author list, and a paragraph of synopsis fit
    /// comfortably; the cap keeps a misbehaving model from producing an
    /// essay-length reply on our bill.
    pub max_output_tokens: usize,

    /// Per-request timeout in seconds for both backends. Default: 60.
    pub api_timeout_secs: u64,

    /// Pre-constructed generative backend. Takes precedence over building
    /// a live Gemini client, and skips credential resolution entirely.
    pub generator: Option<Arc<dyn TextGenerator>>,

    /// Pre-constructed citation backend. Takes precedence over building a
    /// live Crossref client.
    pub citations: Option<Arc<dyn CitationSource>>,

    /// Stage-boundary observer, e.g. a terminal spinner. Default: none.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            token_file: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            crossref_base_url: DEFAULT_CROSSREF_BASE_URL.to_string(),
            lookup_citation: true,
            mailto: None,
            temperature: 0.2,
            max_output_tokens: 1024,
            api_timeout_secs: 60,
            generator: None,
            citations: None,
            observer: None,
        }
    }
}

impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("token_file", &self.token_file)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("crossref_base_url", &self.crossref_base_url)
            .field("lookup_citation", &self.lookup_citation)
            .field("mailto", &self.mailto)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("generator", &self.generator.as_ref().map(|_| "<dyn TextGenerator>"))
            .field("citations", &self.citations.as_ref().map(|_| "<dyn CitationSource>"))
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Effective token-file path: the configured one, else
    /// `~/.config/gemini.token`.
    pub fn token_file_path(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("gemini.token")
        })
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.config.api_key_env = var.into();
        self
    }

    pub fn token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.token_file = Some(path.into());
        self
    }

    pub fn gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.gemini_base_url = url.into();
        self
    }

    pub fn crossref_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.crossref_base_url = url.into();
        self
    }

    pub fn lookup_citation(mut self, v: bool) -> Self {
        self.config.lookup_citation = v;
        self
    }

    pub fn mailto(mut self, email: impl Into<String>) -> Self {
        self.config.mailto = Some(email.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_output_tokens(mut self, n: usize) -> Self {
        self.config.max_output_tokens = n.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.config.generator = Some(generator);
        self
    }

    pub fn citations(mut self, citations: Arc<dyn CitationSource>) -> Self {
        self.config.citations = Some(citations);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, SummarizeError> {
        let c = &self.config;
        if let Some(ref m) = c.model {
            if m.trim().is_empty() {
                return Err(SummarizeError::InvalidConfig(
                    "Model name must not be empty".into(),
                ));
            }
        }
        if c.api_key_env.trim().is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "API key environment variable name must not be empty".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(SummarizeError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let config = SummarizeConfig::builder().build().unwrap();
        assert_eq!(config.api_key_env, "GOOGLE_API_KEY");
        assert!(config.model.is_none());
        assert!(config.lookup_citation);
    }

    #[test]
    fn empty_model_rejected() {
        let err = SummarizeConfig::builder().model("  ").build();
        assert!(matches!(err, Err(SummarizeError::InvalidConfig(_))));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = SummarizeConfig::builder().api_timeout_secs(0).build();
        assert!(matches!(err, Err(SummarizeError::InvalidConfig(_))));
    }

    #[test]
    fn temperature_is_clamped() {
        let config = SummarizeConfig::builder().temperature(9.0).build().unwrap();
        assert_eq!(config.temperature, 2.0);
    }

    #[test]
    fn token_file_path_prefers_override() {
        let config = SummarizeConfig::builder()
            .token_file("/tmp/some.token")
            .build()
            .unwrap();
        assert_eq!(config.token_file_path(), PathBuf::from("/tmp/some.token"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = SummarizeConfig::builder().api_key("secret").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
