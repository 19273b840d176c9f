//! Proteins of the selected search and the viewer link of one of them.

mod render;
mod state;
mod update;

pub use render::render_proteins;
pub use state::{ProteinSelection, ProteinsState};
pub use update::{
    change_search, handle_key, handle_link_resolved, handle_overview_loaded, open_link,
    select_highlighted, start_loading,
};
