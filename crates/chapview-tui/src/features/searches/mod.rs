//! Search selection.

mod render;
mod state;
mod update;

pub use render::{render_searches, search_cells, search_header, search_widths};
pub use state::SearchesState;
pub use update::{PAGE_STEP, handle_key, handle_loaded, select_highlighted, start_loading};
