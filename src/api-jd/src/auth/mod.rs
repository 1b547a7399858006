pub mod handlers;
pub mod password;
pub mod token;

pub use handlers::{AuthState, post_login, post_register, post_validate};
