//! [`Query`] collection related to the multiple [`User`]s.

use std::{convert::Infallible, iter};

use common::operations::{By, Select};

#[cfg(doc)]
use crate::domain::User;
use crate::{
    infra::Database,
    read::user::list::{self, CompanyFilter},
    state, Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`list::Snapshot`] of all the [`User`]s.
pub type Snapshot = DatabaseQuery<By<list::Snapshot, ()>>;

/// Queries the currently selected [`list::Page`] of the [`User`]s table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Page;

impl<Db, Rm, St> Query<Page> for Service<Db, Rm, St>
where
    Db: Database<
        Select<By<list::Snapshot, ()>>,
        Ok = list::Snapshot,
        Err = Infallible,
    >,
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(&self, _: Page) -> Result<Self::Ok, Self::Err> {
        let snapshot = self.database().execute(Select(By::new(()))).await?;

        let mut table = self.state().table.lock().await;
        table.sync(&snapshot);
        Ok(table.current())
    }
}

/// Queries [`CompanyFilter`]s applicable to the [`User`]s table.
///
/// [`CompanyFilter::All`] always goes first, followed by every distinct
/// company of the [`User`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Companies;

impl<Db, Rm, St> Query<Companies> for Service<Db, Rm, St>
where
    Db: Database<
        Select<By<list::Snapshot, ()>>,
        Ok = list::Snapshot,
        Err = Infallible,
    >,
{
    type Ok = Vec<CompanyFilter>;
    type Err = Infallible;

    async fn execute(&self, _: Companies) -> Result<Self::Ok, Self::Err> {
        let snapshot = self.database().execute(Select(By::new(()))).await?;

        Ok(iter::once(CompanyFilter::All)
            .chain(
                list::companies(&snapshot.users)
                    .into_iter()
                    .map(CompanyFilter::Exact),
            )
            .collect())
    }
}

/// Queries the [`state::Status`] of fetching the [`User`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Status;

impl<Db, Rm, St> Query<Status> for Service<Db, Rm, St> {
    type Ok = state::Status;
    type Err = Infallible;

    async fn execute(&self, _: Status) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().status.lock().await.clone())
    }
}

/// Queries the [`list::Filter`] and [`list::Sort`] currently applied to the
/// [`User`]s table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Criteria;

impl<Db, Rm, St> Query<Criteria> for Service<Db, Rm, St> {
    type Ok = (list::Filter, list::Sort);
    type Err = Infallible;

    async fn execute(&self, _: Criteria) -> Result<Self::Ok, Self::Err> {
        let table = self.state().table.lock().await;
        Ok((table.filter().clone(), *table.sort()))
    }
}
