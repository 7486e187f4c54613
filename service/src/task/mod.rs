//! Background [`Task`]s definitions.

mod background;
pub mod load_users;

pub use common::Handler as Task;

pub use self::{
    background::{Background, TaskError},
    load_users::LoadUsers,
};
