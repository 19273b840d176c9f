pub mod cursor;
pub mod load;
pub mod render_utils;
pub mod task;
pub mod text;

pub use cursor::ListCursor;
pub use load::Load;
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{mask_secret, truncate_start_with_ellipsis, truncate_with_ellipsis};
