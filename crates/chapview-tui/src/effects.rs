//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs a
//! request itself.

use chapview_core::api::SearchId;
use chapview_core::proteins::ProteinRow;
use chapview_core::viewer::Variant;

use crate::common::TaskId;

#[derive(Debug, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Validate `api_key` by fetching the user profile.
    Authenticate { task: TaskId, api_key: String },

    /// List the searches offered by `variant`.
    LoadSearches {
        task: TaskId,
        api_key: String,
        variant: Variant,
    },

    /// Fetch a search's detail and protein table.
    LoadOverview {
        task: TaskId,
        api_key: String,
        search_id: SearchId,
    },

    /// Build the viewer link for a protein row (may fetch peptides).
    ResolveLink {
        task: TaskId,
        api_key: String,
        variant: Variant,
        search_id: SearchId,
        row: ProteinRow,
    },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
