//! Dashboard variants and structure-viewer links.
//!
//! The viewer takes its input through the query string:
//!
//! ```text
//! <viewer_url>?protein_id=<id>&input_type=<peptides|redundant_peptides>&input=<serialized>
//! ```
//!
//! Values are inserted verbatim. The viewer splits `input` on `;` and `,`
//! itself, so percent-encoding those separators would break it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::SearchStatus;
use crate::proteins::ProteinName;

/// Which of the two dashboards is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Lists every search; links carry bare peptide sequences.
    #[default]
    Peptides,
    /// Lists succeeded searches only; links carry `sequence;psm_count` pairs
    /// fetched per protein.
    RedundantPeptides,
}

impl Variant {
    /// Value of the viewer's `input_type` query parameter.
    pub fn input_type(self) -> &'static str {
        match self {
            Variant::Peptides => "peptides",
            Variant::RedundantPeptides => "redundant_peptides",
        }
    }

    /// Server-side status filter applied to the search listing.
    pub fn status_filter(self) -> Option<SearchStatus> {
        match self {
            Variant::Peptides => None,
            Variant::RedundantPeptides => Some(SearchStatus::Succeeded),
        }
    }

    /// Whether the protein table carries the `seq_cnt` column.
    pub fn shows_peptide_counts(self) -> bool {
        matches!(self, Variant::RedundantPeptides)
    }

    /// Whether building a link needs a per-protein peptide fetch.
    pub fn fetches_peptides(self) -> bool {
        matches!(self, Variant::RedundantPeptides)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Variant::Peptides => "peptides",
            Variant::RedundantPeptides => "redundant peptides",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_type())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "peptides" => Ok(Variant::Peptides),
            "redundant_peptides" | "redundant-peptides" => Ok(Variant::RedundantPeptides),
            other => Err(format!(
                "unknown variant '{other}' (expected 'peptides' or 'redundant-peptides')"
            )),
        }
    }
}

/// Errors building a viewer link.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("viewer URL '{0}' must not already contain a query string")]
    BaseHasQuery(String),
    #[error("viewer link is not a valid URL: {0}")]
    InvalidUrl(String),
}

/// An outbound link to the structure viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerLink {
    pub protein: ProteinName,
    pub variant: Variant,
    pub serialized_peptides: String,
    pub url: String,
}

impl ViewerLink {
    /// Builds the link for `protein` with an already serialized peptide input.
    pub fn build(
        viewer_url: &str,
        protein: ProteinName,
        variant: Variant,
        serialized_peptides: String,
    ) -> Result<Self, LinkError> {
        let url = build_viewer_url(
            viewer_url,
            &protein.protein_id,
            variant,
            &serialized_peptides,
        )?;
        Ok(Self {
            protein,
            variant,
            serialized_peptides,
            url,
        })
    }
}

/// Formats the viewer URL and checks that the result parses.
pub fn build_viewer_url(
    viewer_url: &str,
    protein_id: &str,
    variant: Variant,
    serialized_peptides: &str,
) -> Result<String, LinkError> {
    if viewer_url.contains('?') {
        return Err(LinkError::BaseHasQuery(viewer_url.to_string()));
    }
    let url = format!(
        "{viewer_url}?protein_id={protein_id}&input_type={}&input={serialized_peptides}",
        variant.input_type()
    );
    url::Url::parse(&url).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;
    Ok(url)
}
