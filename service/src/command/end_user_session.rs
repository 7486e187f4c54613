//! [`Command`] for ending a [`Session`].

use std::convert::Infallible;

use tracing as log;

#[cfg(doc)]
use crate::{domain::user::Session, state::Table};
use crate::{state::Lifetime, Service};

use super::Command;

/// [`Command`] for ending a [`Session`].
///
/// Tears down the administrator's view: ends its [`Lifetime`], so no late
/// fetch result is applied, and resets the [`Table`] to its initial state.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndUserSession;

impl<Db, Rm, St> Command<EndUserSession> for Service<Db, Rm, St> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: EndUserSession) -> Result<Self::Ok, Self::Err> {
        let ended = {
            let mut lifetime = self.state().lifetime.lock().await;
            std::mem::replace(&mut *lifetime, Lifetime::new())
        };
        ended.end();

        self.state().table.lock().await.reset();

        log::debug!("`Session` ended");

        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            RefreshUsers, SetUserFilter,
        },
        query,
        read::user::list::{Filter, Sort},
        Command as _, Query as _,
    };

    use super::EndUserSession;

    #[tokio::test]
    async fn resets_table_view() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        _ = service
            .execute(SetUserFilter {
                search: Some("bo".to_owned()),
                company: None,
            })
            .await
            .unwrap();

        service.execute(EndUserSession).await.unwrap();

        let (filter, sort) =
            service.execute(query::users::Criteria).await.unwrap();
        assert_eq!(filter, Filter::default());
        assert_eq!(sort, Sort::default());
        let page = service.execute(query::users::Page).await.unwrap();
        assert_eq!(page.span.total, 2);
    }
}
