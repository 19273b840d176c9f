//! Fetch-and-derive steps shared by the dashboard and the CLI.
//!
//! Each function is one "render pass" worth of remote work for a view; none
//! of them retry or cache.

use crate::api::{ApiError, ChaparralApi, SearchId, SearchResult};
use crate::proteins::{
    ProteinNameError, ProteinRow, protein_rows, serialize_peptides, serialize_redundant_peptides,
};
use crate::viewer::{LinkError, Variant, ViewerLink};

/// Protein listing of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum ProteinTable {
    /// The search has no proteins; the view shows a warning and stops there.
    Empty,
    Rows(Vec<ProteinRow>),
}

impl ProteinTable {
    pub fn rows(&self) -> &[ProteinRow] {
        match self {
            ProteinTable::Empty => &[],
            ProteinTable::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ProteinTable::Empty)
    }
}

/// Everything the protein view shows for a selected search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOverview {
    pub search: SearchResult,
    pub proteins: ProteinTable,
}

/// Errors deriving a viewer link for a protein row.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ViewerLinkError {
    #[error(transparent)]
    Name(#[from] ProteinNameError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Lists the searches offered by `variant`.
pub async fn load_searches<A: ChaparralApi>(
    api: &A,
    variant: Variant,
) -> Result<Vec<SearchResult>, ApiError> {
    let searches = api.list_search_results(variant.status_filter()).await?;
    tracing::debug!(count = searches.len(), %variant, "searches loaded");
    Ok(searches)
}

/// Fetches a search's detail and its protein table.
pub async fn load_search_overview<A: ChaparralApi>(
    api: &A,
    id: &SearchId,
) -> Result<SearchOverview, ApiError> {
    let search = api.get_search_result(id).await?;
    let records = api.list_proteins(&search.id).await?;
    let proteins = if records.is_empty() {
        tracing::warn!(search_id = %id, "search has no proteins");
        ProteinTable::Empty
    } else {
        ProteinTable::Rows(protein_rows(records))
    };
    Ok(SearchOverview { search, proteins })
}

/// Builds the `input_type=peptides` link from the row's own sequences.
pub fn peptide_link(viewer_url: &str, row: &ProteinRow) -> Result<ViewerLink, ViewerLinkError> {
    let name = row.parse_name()?;
    let serialized = serialize_peptides(row.peptide_sequences());
    Ok(ViewerLink::build(
        viewer_url,
        name,
        Variant::Peptides,
        serialized,
    )?)
}

/// Builds the viewer link for a selected protein row.
///
/// The composite name is validated before any remote call. For
/// [`Variant::RedundantPeptides`] the peptides and PSM counts are fetched
/// for the protein; otherwise the row's sequences are used directly.
pub async fn viewer_link<A: ChaparralApi>(
    api: &A,
    viewer_url: &str,
    variant: Variant,
    search_id: &SearchId,
    row: &ProteinRow,
) -> Result<ViewerLink, ViewerLinkError> {
    match variant {
        Variant::Peptides => peptide_link(viewer_url, row),
        Variant::RedundantPeptides => {
            let name = row.parse_name()?;
            let peptides = api.get_protein_peptides(search_id, row.name()).await?;
            let serialized = serialize_redundant_peptides(&peptides);
            Ok(ViewerLink::build(viewer_url, name, variant, serialized)?)
        }
    }
}
