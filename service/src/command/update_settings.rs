//! [`Command`] for updating the [`Settings`].

use std::convert::Infallible;

use common::operations::{By, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Settings,
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Settings`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateSettings {
    /// Indicator whether the dark theme should be enabled.
    pub dark_mode: bool,
}

impl<Db, Rm, St> Command<UpdateSettings> for Service<Db, Rm, St>
where
    St: Storage<
            Select<By<Option<Settings>, ()>>,
            Ok = Option<Settings>,
            Err = Traced<storage::Error>,
        > + Storage<Update<Settings>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = Settings;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: UpdateSettings,
    ) -> Result<Self::Ok, Self::Err> {
        let mut settings = self.settings().await.write().await;
        settings.dark_mode = cmd.dark_mode;
        self.persist(*settings).await;
        Ok(*settings)
    }
}

impl<Db, Rm, St> Service<Db, Rm, St> {
    /// Writes the provided [`Settings`] into the [`Storage`].
    ///
    /// Failures are logged and ignored: the [`Settings`] stay applied for
    /// the running [`Service`] anyway.
    pub(crate) async fn persist(&self, settings: Settings)
    where
        St: Storage<Update<Settings>, Ok = (), Err = Traced<storage::Error>>,
    {
        if let Err(e) = self.storage().execute(Update(settings)).await {
            log::warn!("failed to store `Settings`: {e}");
        }
    }
}
