//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod state;
pub mod task;

use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use common::operations::{By, Select, Start};
use derive_more::Error;
use smart_default::SmartDefault;
use tokio::sync::RwLock;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use infra::Database;
use infra::{storage, Storage};

pub use self::{command::Command, query::Query, state::State, task::Task};
use self::domain::Settings;

/// Default number of [`User`]s on a single page.
///
/// [`User`]: domain::User
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Maximum number of [`User`]s on a single page.
    ///
    /// [`User`]: domain::User
    #[default(DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,

    /// Simulated latency of saving an edited [`User`].
    ///
    /// [`User`]: domain::User
    #[default(Duration::from_millis(700))]
    pub save_latency: Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Rm, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Remote`] source of this [`Service`].
    ///
    /// [`Remote`]: infra::Remote
    remote: Rm,

    /// [`Storage`] of this [`Service`].
    storage: St,

    /// Shared [`State`] of this [`Service`].
    state: Arc<State>,
}

impl<Db, Rm, St> Service<Db, Rm, St> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        database: Db,
        remote: Rm,
        storage: St,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<By<task::LoadUsers<Self>, ()>>,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            remote,
            storage,
            state: Arc::new(State::new(config.page_size)),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("load_users", async move {
            svc.execute(Start(By::new(()))).await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Remote`] source of this [`Service`].
    ///
    /// [`Remote`]: infra::Remote
    #[must_use]
    pub fn remote(&self) -> &Rm {
        &self.remote
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns shared [`State`] of this [`Service`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the current [`Settings`], loading them from the [`Storage`]
    /// on the first access.
    ///
    /// Missing or malformed stored [`Settings`] are replaced with the
    /// default ones.
    pub(crate) async fn settings(&self) -> &RwLock<Settings>
    where
        St: Storage<
            Select<By<Option<Settings>, ()>>,
            Ok = Option<Settings>,
            Err = Traced<storage::Error>,
        >,
    {
        self.state
            .settings
            .get_or_init(|| async {
                let stored = self
                    .storage
                    .execute(Select(By::new(())))
                    .await
                    .unwrap_or_else(|e| {
                        log::warn!("failed to load stored `Settings`: {e}");
                        None
                    });
                RwLock::new(stored.unwrap_or_default())
            })
            .await
    }
}
