//! [`Command`] for toggling a [`Sort`] of the [`User`]s table.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    read::user::list::{Sort, SortKey},
    Service,
};

use super::Command;

/// [`Command`] for toggling a [`Sort`] of the [`User`]s table by the
/// provided [`SortKey`].
///
/// See [`Sort::toggled()`] for the exact rules.
#[derive(Clone, Copy, Debug)]
pub struct ToggleUserSort {
    /// [`SortKey`] to sort by.
    pub key: SortKey,
}

impl<Db, Rm, St> Command<ToggleUserSort> for Service<Db, Rm, St> {
    type Ok = Sort;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: ToggleUserSort,
    ) -> Result<Self::Ok, Self::Err> {
        let mut table = self.state().table.lock().await;
        let sort = table.sort().toggled(cmd.key);
        table.set_sort(sort);
        Ok(sort)
    }
}
