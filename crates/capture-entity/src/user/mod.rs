//! User domain entities.

pub mod follow;
pub mod model;

pub use follow::Follow;
pub use model::{CreateUser, UpdateProfile, User};
