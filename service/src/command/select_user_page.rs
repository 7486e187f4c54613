//! [`Command`] for selecting a page of the [`User`]s table.

use std::convert::Infallible;

use common::{
    operations::{By, Select},
    pagination,
};

#[cfg(doc)]
use crate::domain::User;
use crate::{infra::Database, read::user::list, Service};

use super::Command;

/// [`Command`] for selecting a page of the [`User`]s table.
///
/// Pages out of range are clamped to the nearest existing one.
#[derive(Clone, Copy, Debug)]
pub enum SelectUserPage {
    /// Select the page with the exact number.
    Exact(pagination::Number),

    /// Select the page following the current one.
    Next,

    /// Select the page preceding the current one.
    Prev,
}

impl<Db, Rm, St> Command<SelectUserPage> for Service<Db, Rm, St>
where
    Db: Database<
        Select<By<list::Snapshot, ()>>,
        Ok = list::Snapshot,
        Err = Infallible,
    >,
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: SelectUserPage,
    ) -> Result<Self::Ok, Self::Err> {
        let snapshot = self.database().execute(Select(By::new(()))).await?;

        let mut table = self.state().table.lock().await;
        table.sync(&snapshot);
        let pages = table.pages();
        _ = match cmd {
            SelectUserPage::Exact(n) => pages.select(n),
            SelectUserPage::Next => pages.next(),
            SelectUserPage::Prev => pages.prev(),
        };
        Ok(table.current())
    }
}
