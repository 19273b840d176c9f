use std::fmt;

use futures_util::{Stream, TryStreamExt, stream};
use serde::de::DeserializeOwned;
use url::Url;

use super::errors::{ApiError, AuthError};
use super::types::{PeptideRecord, ProteinRecord, SearchId, SearchResult, SearchStatus, UserProfile};
use super::ChaparralApi;
use crate::config::Config;

const USER_AGENT: &str = concat!("chapview/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Chaparral REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct ChaparralClient {
    base_url: Url,
    api_key: String,
    page_size: u32,
    http: reqwest::Client,
}

impl fmt::Debug for ChaparralClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaparralClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl ChaparralClient {
    /// Creates a client for `api_key` using the configured base URL,
    /// page size and timeout.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ApiError::Config(format!("api_base_url '{}': {e}", config.api_base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "api_base_url '{}' cannot be used as a base URL",
                config.api_base_url
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            page_size: config.protein_page_size(),
            http,
        })
    }

    /// Creates a client and verifies the key by fetching the profile.
    pub async fn login(
        config: &Config,
        api_key: &str,
    ) -> Result<(Self, UserProfile), AuthError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AuthError::EmptyKey);
        }
        let client = Self::new(config, api_key)?;
        let user = client.get_user_profile().await?;
        Ok((client, user))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Config("api_base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        tracing::debug!(%path, ?query, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::transport(&path, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%path, status = status.as_u16(), "request failed");
            return Err(ApiError::status(&path, status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&path, &e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(&path, &e))
    }

    /// Streams a search's proteins page by page.
    ///
    /// Requests `limit = page_size` proteins at increasing offsets; a page
    /// shorter than `page_size` is the last one. Paging also stops when the
    /// server returns more rows than `limit`, or repeats the previous page.
    pub fn protein_pages<'a>(
        &'a self,
        id: &'a SearchId,
    ) -> impl Stream<Item = Result<Vec<ProteinRecord>, ApiError>> + Send + 'a {
        let limit = u64::from(self.page_size);
        stream::try_unfold(Some(PageCursor::default()), move |cursor| async move {
            let Some(PageCursor {
                offset,
                previous_first,
            }) = cursor
            else {
                return Ok(None);
            };
            let page: Vec<ProteinRecord> = self
                .get_json(
                    &["search_result", id.as_str(), "proteins"],
                    &[("offset", offset.to_string()), ("limit", limit.to_string())],
                )
                .await?;

            let first = page.first().map(|p| p.name.clone());
            if first.is_some() && first == previous_first {
                tracing::warn!(search_id = %id, offset, "protein page repeated, paging stopped");
                return Ok(None);
            }

            let fetched = page.len() as u64;
            if fetched > limit {
                tracing::warn!(search_id = %id, fetched, limit, "protein page exceeds limit, paging stopped");
                return Ok(Some((page, None)));
            }
            let next = (fetched == limit).then(|| PageCursor {
                offset: offset + fetched,
                previous_first: first,
            });
            Ok(Some((page, next)))
        })
    }
}

/// Position of the next protein page request.
#[derive(Debug, Default)]
struct PageCursor {
    offset: u64,
    /// First protein name of the previous page.
    previous_first: Option<String>,
}

impl ChaparralApi for ChaparralClient {
    async fn get_user_profile(&self) -> Result<UserProfile, AuthError> {
        let user: UserProfile = self.get_json(&["user", "profile"], &[]).await?;
        tracing::info!(email = %user.email, "authenticated");
        Ok(user)
    }

    async fn list_search_results(
        &self,
        status: Option<SearchStatus>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let query: Vec<(&str, String)> = status
            .map(|s| ("status", s.as_str().to_string()))
            .into_iter()
            .collect();
        self.get_json(&["search_result"], &query).await
    }

    async fn get_search_result(&self, id: &SearchId) -> Result<SearchResult, ApiError> {
        self.get_json(&["search_result", id.as_str()], &[]).await
    }

    async fn list_proteins(&self, id: &SearchId) -> Result<Vec<ProteinRecord>, ApiError> {
        let proteins: Vec<ProteinRecord> = self.protein_pages(id).try_concat().await?;
        tracing::debug!(search_id = %id, count = proteins.len(), "proteins listed");
        Ok(proteins)
    }

    async fn get_protein_peptides(
        &self,
        id: &SearchId,
        protein_name: &str,
    ) -> Result<Vec<PeptideRecord>, ApiError> {
        self.get_json(
            &["search_result", id.as_str(), "proteins", protein_name, "peptides"],
            &[],
        )
        .await
    }
}
