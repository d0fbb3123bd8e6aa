//! User domain module.
//!
//! - `model`: the signed-in user
//! - `repository`: persistence trait for the user object

mod model;
mod repository;

pub use model::User;
pub use repository::UserRepository;
