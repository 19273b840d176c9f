//! Login gate.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::LoginForm;
pub use update::{handle_key, handle_login_result, handle_paste, logout, submit};
