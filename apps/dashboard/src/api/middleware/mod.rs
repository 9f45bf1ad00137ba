pub mod auth;

pub use auth::{authorize_page, CurrentUser, UserAdmin};
