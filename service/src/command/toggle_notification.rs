//! [`Command`] for toggling notifications via a [`Channel`].

use std::convert::Infallible;

use common::operations::{By, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{settings::Channel, Settings},
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for toggling notifications via a [`Channel`].
#[derive(Clone, Copy, Debug)]
pub struct ToggleNotification {
    /// [`Channel`] to toggle notifications via.
    pub channel: Channel,
}

impl<Db, Rm, St> Command<ToggleNotification> for Service<Db, Rm, St>
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
        cmd: ToggleNotification,
    ) -> Result<Self::Ok, Self::Err> {
        let mut settings = self.settings().await.write().await;
        _ = settings.toggle_notification(cmd.channel);
        self.persist(*settings).await;
        Ok(*settings)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture::{test_service, FakeRemote},
        domain::settings::Channel,
        Command as _,
    };

    use super::ToggleNotification;

    #[tokio::test]
    async fn toggles_only_requested_channel() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        let settings = service
            .execute(ToggleNotification {
                channel: Channel::Sms,
            })
            .await
            .unwrap();

        assert!(settings.notifications.sms);
        assert!(settings.notifications.email);
        assert!(settings.notifications.push);
    }
}
