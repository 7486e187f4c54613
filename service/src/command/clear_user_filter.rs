//! [`Command`] for clearing a [`Filter`] of the [`User`]s table.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::User;
use crate::{read::user::list::Filter, Service};

use super::Command;

/// [`Command`] for clearing a [`Filter`] of the [`User`]s table, returning
/// it to its first page.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearUserFilter;

impl<Db, Rm, St> Command<ClearUserFilter> for Service<Db, Rm, St> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: ClearUserFilter) -> Result<Self::Ok, Self::Err> {
        let mut table = self.state().table.lock().await;
        table.set_filter(Filter::default());
        _ = table.pages().select(1);
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
        read::user::list::Filter,
        Command as _, Query as _,
    };

    use super::ClearUserFilter;

    #[tokio::test]
    async fn restores_unfiltered_table() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        _ = service
            .execute(SetUserFilter {
                search: Some("zzz".to_owned()),
                company: None,
            })
            .await
            .unwrap();

        service.execute(ClearUserFilter).await.unwrap();

        let (filter, _) =
            service.execute(query::users::Criteria).await.unwrap();
        assert_eq!(filter, Filter::default());
        let page = service.execute(query::users::Page).await.unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.users.len(), 2);
    }
}
