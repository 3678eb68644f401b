pub mod dto;
pub mod password;
pub mod services;

pub use dto::Credentials;
pub use password::Password;
pub use services::{authenticate, get_authenticated_user};
