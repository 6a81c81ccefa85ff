//! Login and registration screen.

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{AuthMode, AuthState, LoginForm, RegisterForm};
pub use update::{handle_key, login_failure_message, register_failure_message};
