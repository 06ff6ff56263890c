//! Crossref client: best-match bibliographic lookup by title and author.
//!
//! One request per run: `/works` queried with the summary's title and
//! first author, `rows=1`, sorted by relevance, so the service itself
//! picks the best match. Failures here are always [`LookupError`] — the
//! pipeline treats them the same as an empty result set.

use crate::backend::CitationSource;
use crate::config::SummarizeConfig;
use crate::error::{LookupError, SummarizeError};
use crate::output::{Citation, CitationAuthor};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Client for the Crossref REST API.
pub struct CrossRefClient {
    http: reqwest::Client,
    base_url: String,
    mailto: Option<String>,
}

// ── Wire types ───────────────────────────────────────────────────────────
//
// Crossref wraps everything in a `message` envelope and reports most
// scalar-looking fields as arrays; the first element is the one that
// matters.

#[derive(Debug, Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Debug, Default, Deserialize)]
struct Work {
    #[serde(default)]
    author: Vec<WorkAuthor>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(default, rename = "container-title")]
    container_title: Vec<String>,
    #[serde(default)]
    published: Option<PartialDate>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkAuthor {
    #[serde(default)]
    given: String,
    #[serde(default)]
    family: String,
}

#[derive(Debug, Default, Deserialize)]
struct PartialDate {
    #[serde(default, rename = "date-parts")]
    date_parts: Vec<Vec<i32>>,
}

// ── Client ───────────────────────────────────────────────────────────────

impl CrossRefClient {
    /// Create a client from the config.
    pub fn new(config: &SummarizeConfig) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| SummarizeError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.crossref_base_url.trim_end_matches('/').to_string(),
            mailto: config.mailto.clone(),
        })
    }

    /// Query URL for a title/author pair: one row, best relevance first.
    fn works_url(&self, title: &str, author: &str) -> String {
        let mut url = format!(
            "{}/works?query.title={}&query.author={}&rows=1&sort=relevance&order=desc",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(author),
        );
        if let Some(ref email) = self.mailto {
            url.push_str(&format!("&mailto={}", urlencoding::encode(email)));
        }
        url
    }

    fn user_agent(&self) -> String {
        match self.mailto {
            Some(ref email) => format!(
                "pdfsum/{} (mailto:{})",
                env!("CARGO_PKG_VERSION"),
                email
            ),
            None => format!("pdfsum/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[async_trait]
impl CitationSource for CrossRefClient {
    fn name(&self) -> &str {
        "Crossref"
    }

    async fn lookup(&self, title: &str, author: &str) -> Result<Option<Citation>, LookupError> {
        let url = self.works_url(title, author);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header("User-Agent", self.user_agent())
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LookupError::RateLimited);
        }
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
            });
        }

        let works: WorksResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(works.message.items.into_iter().next().map(map_work))
    }
}

/// Map a Crossref work record onto the pipeline's [`Citation`].
fn map_work(work: Work) -> Citation {
    // Preserve author order but keep only the first occurrence of each
    // given/family pair; records occasionally repeat an author entry.
    let mut authors: Vec<CitationAuthor> = Vec::with_capacity(work.author.len());
    for a in work.author {
        let author = CitationAuthor {
            given: a.given,
            family: a.family,
        };
        if !authors.contains(&author) {
            authors.push(author);
        }
    }

    let title = work.title.into_iter().next().unwrap_or_default();
    let container_title = work
        .container_title
        .into_iter()
        .find(|t| !t.is_empty());
    let year = work
        .published
        .as_ref()
        .and_then(|d| d.date_parts.first())
        .and_then(|parts| parts.first())
        .copied();

    Citation {
        authors,
        title,
        container_title,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "message": {
            "items": [{
                "author": [
                    {"given": "Grace", "family": "Hopper"},
                    {"given": "Alan", "family": "Turing"},
                    {"given": "Grace", "family": "Hopper"}
                ],
                "title": ["On Computable Summaries"],
                "container-title": ["Journal of Examples"],
                "published": {"date-parts": [[2020, 4, 1], [2021]]}
            }]
        }
    }"#;

    #[test]
    fn map_work_extracts_all_fields() {
        let works: WorksResponse = serde_json::from_str(SAMPLE).unwrap();
        let citation = map_work(works.message.items.into_iter().next().unwrap());

        assert_eq!(citation.title, "On Computable Summaries");
        assert_eq!(citation.container_title.as_deref(), Some("Journal of Examples"));
        assert_eq!(citation.year, Some(2020));
        // Duplicate Hopper entry dropped, order preserved.
        assert_eq!(citation.authors.len(), 2);
        assert_eq!(citation.authors[0].family, "Hopper");
        assert_eq!(citation.authors[1].family, "Turing");
    }

    #[test]
    fn map_work_tolerates_sparse_records() {
        let work: Work = serde_json::from_str(r#"{"title": ["Lone Title"]}"#).unwrap();
        let citation = map_work(work);
        assert_eq!(citation.title, "Lone Title");
        assert!(citation.authors.is_empty());
        assert!(citation.container_title.is_none());
        assert!(citation.year.is_none());
    }

    #[test]
    fn empty_items_means_no_citation() {
        let works: WorksResponse =
            serde_json::from_str(r#"{"message": {"items": []}}"#).unwrap();
        assert!(works.message.items.is_empty());
    }

    #[test]
    fn works_url_carries_query_and_limit() {
        let config = SummarizeConfig::builder().build().unwrap();
        let client = CrossRefClient::new(&config).unwrap();
        let url = client.works_url("A Title: With Punctuation", "Ada Lovelace");

        assert!(url.starts_with("https://api.crossref.org/works?"));
        assert!(url.contains("query.title=A%20Title%3A%20With%20Punctuation"));
        assert!(url.contains("query.author=Ada%20Lovelace"));
        assert!(url.contains("rows=1"));
        assert!(url.contains("sort=relevance"));
        assert!(url.contains("order=desc"));
        assert!(!url.contains("mailto"));
    }

    #[test]
    fn works_url_appends_mailto() {
        let config = SummarizeConfig::builder()
            .mailto("user@example.org")
            .build()
            .unwrap();
        let client = CrossRefClient::new(&config).unwrap();
        let url = client.works_url("T", "A");
        assert!(url.contains("&mailto=user%40example.org"));
        assert!(client.user_agent().contains("mailto:user@example.org"));
    }
}
