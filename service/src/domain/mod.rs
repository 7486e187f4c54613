//! Domain definitions.

pub mod settings;
pub mod user;

pub use self::{settings::Settings, user::User};
