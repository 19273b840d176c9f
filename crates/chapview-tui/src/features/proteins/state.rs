use chapview_core::proteins::ProteinRow;
use chapview_core::viewer::ViewerLink;
use chapview_core::workflow::SearchOverview;

use crate::common::{ListCursor, Load};

/// The single selected protein and its viewer link.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinSelection {
    pub index: usize,
    pub protein_name: String,
    pub link: Load<ViewerLink>,
}

/// Protein page of the selected search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinsState {
    pub overview: Load<SearchOverview>,
    pub cursor: ListCursor,
    pub selection: Option<ProteinSelection>,
}

impl ProteinsState {
    pub fn loading() -> Self {
        Self {
            overview: Load::Loading,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[ProteinRow] {
        self.overview
            .loaded()
            .map_or(&[], |overview| overview.proteins.rows())
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.cursor.selected(self.rows().len())
    }

    pub fn ready_link(&self) -> Option<&ViewerLink> {
        self.selection.as_ref().and_then(|s| s.link.loaded())
    }
}
