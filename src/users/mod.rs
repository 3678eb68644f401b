pub mod dto;
pub mod memory;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod validation;

pub use dto::{CreateUser, UpdateUser};
pub use repo::{PgUserStore, UserStore};
pub use repo_types::User;
pub use services::UserModel;
