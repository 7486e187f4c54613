//! [`Command`] for setting a [`Filter`] of the [`User`]s table.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    read::user::list::{CompanyFilter, Filter},
    Service,
};

use super::Command;

/// [`Command`] for setting a [`Filter`] of the [`User`]s table.
///
/// Omitted parts of the [`Filter`] are left unchanged. Any actual change
/// returns the table to its first page.
#[derive(Clone, Debug, Default)]
pub struct SetUserFilter {
    /// New text to search [`User`]s by.
    pub search: Option<String>,

    /// New [`CompanyFilter`] of [`User`]s.
    pub company: Option<CompanyFilter>,
}

impl<Db, Rm, St> Command<SetUserFilter> for Service<Db, Rm, St> {
    type Ok = Filter;
    type Err = Infallible;

    async fn execute(&self, cmd: SetUserFilter) -> Result<Self::Ok, Self::Err> {
        let SetUserFilter { search, company } = cmd;

        let mut table = self.state().table.lock().await;
        let mut filter = table.filter().clone();
        if let Some(search) = search {
            filter.search = search;
        }
        if let Some(company) = company {
            filter.company = company;
        }
        table.set_filter(filter.clone());

        Ok(filter)
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use crate::{
        command::{
            fixture::{test_service, FakeRemote},
            RefreshUsers,
        },
        query,
        read::user::list::CompanyFilter,
        Command as _, Query as _,
    };

    use super::SetUserFilter;

    #[tokio::test]
    async fn filters_table_and_recomputes_pages() {
        let (service, _dir) = test_service(FakeRemote::ann_and_bo());
        _ = service.execute(RefreshUsers).await.unwrap();
        let before = service.execute(query::users::Page).await.unwrap();
        let again = service.execute(query::users::Page).await.unwrap();
        assert!(Arc::ptr_eq(&before.users, &again.users));

        let filter = service
            .execute(SetUserFilter {
                search: None,
                company: Some(CompanyFilter::from("Zed".to_owned())),
            })
            .await
            .unwrap();
        assert_eq!(filter.search, "");

        let after = service.execute(query::users::Page).await.unwrap();
        assert!(!Arc::ptr_eq(&before.users, &after.users));
        assert_eq!(after.users.len(), 1);
        assert_eq!(after.users[0].name.as_ref(), "Bo");

        let filter = service
            .execute(SetUserFilter {
                search: Some("ann".to_owned()),
                company: None,
            })
            .await
            .unwrap();
        assert_eq!(filter.company, CompanyFilter::from("Zed".to_owned()));
        let page = service.execute(query::users::Page).await.unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.span.from, 0);
    }
}
