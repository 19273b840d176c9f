//! Chaparral API access.
//!
//! The dashboards only consume the service through [`ChaparralApi`]; the HTTP
//! implementation is [`ChaparralClient`].

mod client;
mod errors;
mod types;

use std::future::Future;

pub use client::ChaparralClient;
pub use errors::{ApiError, AuthError};
pub use types::{
    PeptideRecord, ProteinRecord, SearchId, SearchResult, SearchStatus, UserProfile,
};

/// Read-only operations the dashboards need from the remote service.
pub trait ChaparralApi {
    /// Fetches the profile of the key's owner. This doubles as the login check.
    fn get_user_profile(&self) -> impl Future<Output = Result<UserProfile, AuthError>> + Send;

    /// Lists search results, optionally filtered server-side by status.
    fn list_search_results(
        &self,
        status: Option<SearchStatus>,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ApiError>> + Send;

    /// Fetches one search result by id.
    fn get_search_result(
        &self,
        id: &SearchId,
    ) -> impl Future<Output = Result<SearchResult, ApiError>> + Send;

    /// Lists every protein of a search.
    fn list_proteins(
        &self,
        id: &SearchId,
    ) -> impl Future<Output = Result<Vec<ProteinRecord>, ApiError>> + Send;

    /// Lists the peptides (with PSM counts) of one protein of a search.
    fn get_protein_peptides(
        &self,
        id: &SearchId,
        protein_name: &str,
    ) -> impl Future<Output = Result<Vec<PeptideRecord>, ApiError>> + Send;
}
