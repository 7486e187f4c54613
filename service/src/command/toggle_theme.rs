//! [`Command`] for toggling the [`Theme`].

use std::convert::Infallible;

use common::operations::{By, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{settings::Theme, Settings},
    infra::{storage, Storage},
    Service,
};

use super::Command;

/// [`Command`] for switching between the light and the dark [`Theme`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToggleTheme;

impl<Db, Rm, St> Command<ToggleTheme> for Service<Db, Rm, St>
where
    St: Storage<
            Select<By<Option<Settings>, ()>>,
            Ok = Option<Settings>,
            Err = Traced<storage::Error>,
        > + Storage<Update<Settings>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = Theme;
    type Err = Infallible;

    async fn execute(&self, _: ToggleTheme) -> Result<Self::Ok, Self::Err> {
        let mut settings = self.settings().await.write().await;
        let theme = settings.toggle_theme();
        self.persist(*settings).await;
        Ok(theme)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture::{test_service, FakeRemote},
        domain::settings::Theme,
        query, Command as _, Query as _,
    };

    use super::ToggleTheme;

    #[tokio::test]
    async fn switches_theme_back_and_forth() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());

        assert_eq!(service.execute(ToggleTheme).await.unwrap(), Theme::Dark);
        let current = service.execute(query::settings::Current).await.unwrap();
        assert!(current.dark_mode);
        assert_eq!(service.execute(ToggleTheme).await.unwrap(), Theme::Light);
    }
}
