//! [`Command`] for resetting the [`Settings`].

use std::convert::Infallible;

use common::operations::{By, Delete, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Settings,
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for restoring the default [`Settings`] and forgetting the
/// stored ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetSettings;

impl<Db, Rm, St> Command<ResetSettings> for Service<Db, Rm, St>
where
    St: Storage<
            Select<By<Option<Settings>, ()>>,
            Ok = Option<Settings>,
            Err = Traced<storage::Error>,
        > + Storage<
            Delete<By<Settings, ()>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Settings;
    type Err = Infallible;

    async fn execute(&self, _: ResetSettings) -> Result<Self::Ok, Self::Err> {
        let mut settings = self.settings().await.write().await;
        *settings = Settings::default();
        if let Err(e) = self
            .storage()
            .execute(Delete(By::<Settings, _>::new(())))
            .await
        {
            log::warn!("failed to remove stored `Settings`: {e}");
        }
        Ok(*settings)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            ToggleTheme,
        },
        domain::Settings,
        Command as _,
    };

    use super::ResetSettings;

    #[tokio::test]
    async fn restores_defaults_and_removes_stored_blob() {
        let (service, dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(ToggleTheme).await.unwrap();
        let path = dir.path().join("app_settings_v1.json");
        assert!(path.exists());

        let settings = service.execute(ResetSettings).await.unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!path.exists());
    }
}
