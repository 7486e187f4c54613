//! Infrastructure layer.

pub mod database;
pub mod remote;
pub mod storage;

#[cfg(feature = "http")]
pub use self::remote::Http;
pub use self::{
    database::{Database, Memory},
    remote::Remote,
    storage::{JsonFile, Storage},
};
